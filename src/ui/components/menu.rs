pub const WELCOME: &str = "Welcome to the Chat App!";
pub const MAIN_MENU: &str = "1. Register\n2. Login\n3. Exit";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
pub const GOODBYE: &str = "Goodbye!";

pub const ENTER_EMAIL: &str = "Enter your email address:";
pub const ENTER_USERNAME: &str = "Enter your username:";
pub const ENTER_MESSAGE: &str = "Enter your message (type 'exit' to exit chat):";
