//! Application constants
//!
//! Centralized location for domain-level constants: option lists shown by
//! the profile editor and browse filter, slot counts and timing defaults.

/// Fixed number of photo slots per category.
pub const PHOTO_SLOT_COUNT: usize = 5;

/// Document collection holding one profile document per user.
pub const PROFILES_COLLECTION: &str = "profiles";

// Auto-save defaults
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

// Swipe defaults
pub const DEFAULT_SWIPE_THRESHOLD_FRACTION: f32 = 0.25;
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 120.0;
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;
pub const DEFAULT_MAX_ROTATION_DEGREES: f32 = 10.0;

// Document keys written alongside field values
pub const UPDATED_AT_KEY: &str = "updatedAt";
pub const USER_ID_KEY: &str = "userId";

// Age bounds enforced on explicit save
pub const MIN_PROFILE_AGE: u32 = 18;
pub const MAX_PROFILE_AGE: u32 = 120;

/// Interests offered by the browse filter (single-category variant).
pub const ALL_INTERESTS: &[&str] = &[
    "Tech", "Finance", "Art", "Sports", "Music", "Travel", "AI", "Robotics", "Cooking", "Gaming",
    "Books", "Photography", "Outdoors", "Dance", "Design", "Boba", "Cycling",
];

pub const SOCIAL_INTERESTS: &[&str] = &[
    "Clubbing", "Raving", "Drinking", "Shopping", "Sports", "Gaming", "Music", "Dance",
    "Photography", "Travel", "Outdoors", "Cooking", "Boba", "Cycling", "Art", "Books",
];

pub const PROFESSIONAL_INTERESTS: &[&str] = &[
    "Tech", "Finance", "AI", "Robotics", "Design", "Marketing", "Entrepreneurship", "Consulting",
    "Medicine", "Law", "Engineering", "Research", "Academia", "Startup", "Investment Banking",
    "Data Science",
];

pub const SOCIAL_PROMPTS: &[&str] = &["What I love most", "My simple pleasures"];
pub const PROFESSIONAL_PROMPTS: &[&str] = &["My biggest professional goal", "I'm passionate about"];

pub const PRONOUN_OPTIONS: &[&str] = &["He/Him", "She/Her", "They/Them", "Other"];
pub const DEFAULT_PRONOUNS: &str = "They/Them";

pub const PROFILE_INTEREST_OPTIONS: &[&str] =
    &["Coffee", "Hiking", "Photography", "Travel", "Music", "Art"];
pub const HOBBY_OPTIONS: &[&str] =
    &["Reading", "Gaming", "Cooking", "Gardening", "Painting", "Writing"];
pub const LOOKING_FOR_OPTIONS: &[&str] =
    &["Friends to go out with", "Meeting new people", "Activity partners", "Study buddies"];
pub const PROFESSIONAL_GOAL_OPTIONS: &[&str] =
    &["Networking", "Collaborating", "Mentorship", "Career Change"];
pub const INDUSTRY_OPTIONS: &[&str] = &["Tech", "Startups", "Finance", "Healthcare"];
