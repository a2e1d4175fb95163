//! Localized accessibility labels for the author profile.

use byline_core::{Locale, SocialPlatform};

/// Label set for one locale; `{name}` is replaced with the author's name
#[derive(Debug)]
pub struct ProfileLabels {
    pub region: &'static str,
    pub social_nav: &'static str,
    avatar_alt: &'static str,
    profile_link: &'static str,
    github: &'static str,
    twitter: &'static str,
    linkedin: &'static str,
    website: &'static str,
}

static ENGLISH: ProfileLabels = ProfileLabels {
    region: "Author profile",
    social_nav: "Author social media links",
    avatar_alt: "Profile photo of {name}",
    profile_link: "View profile of {name}",
    github: "Visit GitHub profile",
    twitter: "Visit Twitter profile",
    linkedin: "Visit LinkedIn profile",
    website: "Visit personal website",
};

static KOREAN: ProfileLabels = ProfileLabels {
    region: "저자 프로필",
    social_nav: "저자 소셜 미디어 링크",
    avatar_alt: "{name}의 프로필 사진",
    profile_link: "{name}의 프로필 보기",
    github: "GitHub 프로필 방문",
    twitter: "Twitter 프로필 방문",
    linkedin: "LinkedIn 프로필 방문",
    website: "개인 웹사이트 방문",
};

impl ProfileLabels {
    pub fn for_locale(locale: Locale) -> &'static ProfileLabels {
        match locale {
            Locale::En => &ENGLISH,
            Locale::Ko => &KOREAN,
        }
    }

    pub fn avatar_alt(&self, name: &str) -> String {
        self.avatar_alt.replace("{name}", name)
    }

    pub fn profile_link(&self, name: &str) -> String {
        self.profile_link.replace("{name}", name)
    }

    /// Screen-reader label for a social link
    pub fn social(&self, platform: SocialPlatform) -> &'static str {
        match platform {
            SocialPlatform::GitHub => self.github,
            SocialPlatform::Twitter => self.twitter,
            SocialPlatform::LinkedIn => self.linkedin,
            SocialPlatform::Website => self.website,
        }
    }
}

/// Value for the `<html lang>` attribute
pub fn html_lang(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "en",
        Locale::Ko => "ko",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_interpolation() {
        let en = ProfileLabels::for_locale(Locale::En);
        assert_eq!(en.avatar_alt("John Doe"), "Profile photo of John Doe");
        assert_eq!(en.profile_link("John Doe"), "View profile of John Doe");

        let ko = ProfileLabels::for_locale(Locale::Ko);
        assert_eq!(ko.avatar_alt("John Doe"), "John Doe의 프로필 사진");
        assert_eq!(ko.profile_link("John Doe"), "John Doe의 프로필 보기");
    }

    #[test]
    fn test_every_platform_has_a_label() {
        for locale in [Locale::En, Locale::Ko] {
            let labels = ProfileLabels::for_locale(locale);
            for platform in SocialPlatform::ALL {
                assert!(!labels.social(platform).is_empty());
            }
        }
        assert_eq!(
            ProfileLabels::for_locale(Locale::Ko).social(SocialPlatform::Website),
            "개인 웹사이트 방문"
        );
    }
}
