/// Cookie carrying the login session token
pub const SESSION_COOKIE: &str = "session_token";

/// Cookie carrying pending flash messages
pub const FLASH_COOKIE: &str = "flash";

// =============================================================================
// FLASH MESSAGES
// =============================================================================

pub const MSG_LOGIN_SUCCESS: &str = "Login successful!";
pub const MSG_LOGIN_FAILED: &str = "Login failed. Check your username and password.";
pub const MSG_LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const MSG_LOGGED_OUT: &str = "You have been logged out.";
pub const MSG_EMAIL_TAKEN: &str = "Email is already registered. Please log in.";
pub const MSG_SIGNUP_SUCCESS: &str = "Registration successful! Please log in.";
pub const MSG_NO_TECHNICIANS: &str = "No available technicians. Please try again later.";
pub const MSG_REQUEST_NOT_FOUND: &str = "Service request not found";
