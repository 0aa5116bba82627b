mod helpers;
mod refresh_tests;
