// Test modules for Groops
// Each module exercises the corresponding source module
