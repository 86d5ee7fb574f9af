//! Social/professional categories
//!
//! One enum-keyed configuration drives every category-specific choice
//! (interest options, prompts, field keys) so form sections and deck filters
//! are written once.

use serde::{Deserialize, Serialize};

use super::profile::ProfileField;
use crate::constants::{
    PROFESSIONAL_INTERESTS, PROFESSIONAL_PROMPTS, SOCIAL_INTERESTS, SOCIAL_PROMPTS,
};
use crate::impl_domain_key_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Social,
    Professional,
}

impl_domain_key_conversions!(Category {
    Social => "social",
    Professional => "professional",
});

impl Category {
    /// Static configuration for this category.
    pub fn config(self) -> CategoryConfig {
        match self {
            Self::Social => CategoryConfig {
                category: self,
                interest_options: SOCIAL_INTERESTS,
                prompt_options: SOCIAL_PROMPTS,
                photos_field: ProfileField::SocialPhotos,
                prompt_field: ProfileField::SelectedPrompt,
                prompt_response_field: ProfileField::PromptResponse,
                tag_fields: &[
                    ProfileField::SocialInterests,
                    ProfileField::Hobbies,
                    ProfileField::LookingFor,
                ],
            },
            Self::Professional => CategoryConfig {
                category: self,
                interest_options: PROFESSIONAL_INTERESTS,
                prompt_options: PROFESSIONAL_PROMPTS,
                photos_field: ProfileField::ProfessionalPhotos,
                prompt_field: ProfileField::ProfessionalPrompt,
                prompt_response_field: ProfileField::ProfessionalPromptResponse,
                tag_fields: &[ProfileField::ProfessionalGoals, ProfileField::IndustryInterests],
            },
        }
    }
}

/// Category-specific options and document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryConfig {
    pub category: Category,
    pub interest_options: &'static [&'static str],
    pub prompt_options: &'static [&'static str],
    pub photos_field: ProfileField,
    pub prompt_field: ProfileField,
    pub prompt_response_field: ProfileField,
    pub tag_fields: &'static [ProfileField],
}

/// Canonical form of an interest tag. Every tag comparison goes through
/// this so filtering and selection agree on non-ASCII tags.
pub fn fold_tag(tag: &str) -> String {
    tag.to_lowercase()
}

/// Whether two interest tags name the same interest.
pub fn same_tag(a: &str, b: &str) -> bool {
    a == b || fold_tag(a) == fold_tag(b)
}

impl CategoryConfig {
    /// Prompt preselected on a fresh document.
    pub fn default_prompt(&self) -> &'static str {
        self.prompt_options.first().copied().unwrap_or_default()
    }

    /// Whether `tag` is one of this category's interest options
    /// (case-insensitive).
    pub fn offers_interest(&self, tag: &str) -> bool {
        self.interest_options.iter().any(|option| same_tag(option, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configs_point_at_distinct_fields() {
        let social = Category::Social.config();
        let professional = Category::Professional.config();
        assert_eq!(social.photos_field, ProfileField::SocialPhotos);
        assert_eq!(professional.photos_field, ProfileField::ProfessionalPhotos);
        assert_ne!(social.prompt_field, professional.prompt_field);
    }

    #[test]
    fn default_prompts_match_first_option() {
        assert_eq!(Category::Social.config().default_prompt(), "What I love most");
        assert_eq!(
            Category::Professional.config().default_prompt(),
            "My biggest professional goal"
        );
    }

    #[test]
    fn offers_interest_ignores_case() {
        assert!(Category::Professional.config().offers_interest("data science"));
        assert!(!Category::Professional.config().offers_interest("Clubbing"));
    }

    #[test]
    fn same_tag_folds_beyond_ascii() {
        assert!(same_tag("Café", "CAFÉ"));
        assert!(same_tag("AI", "ai"));
        assert!(!same_tag("Art", "Arts"));
        assert_eq!(fold_tag("ÜRÜN"), "ürün");
    }

    #[test]
    fn category_keys_round_trip() {
        assert_eq!("Social".parse::<Category>().unwrap(), Category::Social);
        assert_eq!(Category::Professional.to_string(), "professional");
    }
}
