pub mod fetch_service;
pub mod quote_service;
pub mod valuation_service;
