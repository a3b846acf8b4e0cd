mod listing_tests;
mod vehicle_tests;
