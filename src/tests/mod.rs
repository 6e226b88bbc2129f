pub mod mock_page;
mod session_tests;
