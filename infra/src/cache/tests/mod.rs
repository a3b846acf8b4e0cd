mod memory_store_tests;
mod redis_client_tests;
