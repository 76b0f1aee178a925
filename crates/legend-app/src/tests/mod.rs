mod console_tests;
mod sync_channel_tests;
