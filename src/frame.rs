//! Mini-app descriptors
//!
//! The hosting page advertises the game with two JSON documents: the app
//! manifest served at `/.well-known/farcaster.json`, and the embed placed in
//! the page's `fc:frame` meta tag. Both are derived from the public app URL.

use serde::{Deserialize, Serialize};

/// Used when no app URL is configured
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

pub const APP_NAME: &str = "Space Jump";
const SPLASH_BACKGROUND: &str = "#ffffff";
const EMBED_SPLASH_BACKGROUND: &str = "#ff69b4";

/// Signed domain association (left blank until the domain is verified)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

/// App metadata block of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    pub name: String,
    pub version: String,
    pub icon_url: String,
    pub home_url: String,
    pub image_url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub webhook_url: String,
    pub description: String,
    pub primary_category: String,
    pub hero_image_url: String,
    pub screenshot_urls: Vec<String>,
    pub subtitle: String,
}

/// `/.well-known/farcaster.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameManifest {
    pub account_association: AccountAssociation,
    pub frame: FrameInfo,
}

impl FrameManifest {
    pub fn for_app(app_url: &str) -> Self {
        let base = app_url.trim_end_matches('/');
        let logo = format!("{}/images/logo.png", base);
        Self {
            account_association: AccountAssociation::default(),
            frame: FrameInfo {
                name: APP_NAME.to_string(),
                version: "1".to_string(),
                icon_url: logo.clone(),
                home_url: base.to_string(),
                image_url: logo.clone(),
                splash_image_url: logo.clone(),
                splash_background_color: SPLASH_BACKGROUND.to_string(),
                webhook_url: format!("{}/api/webhook", base),
                description: "Addictive space game to just dodge and compete".to_string(),
                primary_category: "games".to_string(),
                hero_image_url: logo.clone(),
                screenshot_urls: vec![logo],
                subtitle: "Jump from platform to platform through space".to_string(),
            },
        }
    }
}

/// Action fired by the embed button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedButton {
    pub title: String,
    pub action: EmbedAction,
}

/// Content of the `fc:frame` meta tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEmbed {
    pub version: String,
    pub image_url: String,
    pub button: EmbedButton,
}

impl FrameEmbed {
    /// Name of the meta tag carrying the embed
    pub const META_NAME: &'static str = "fc:frame";

    pub fn for_app(app_url: &str) -> Self {
        let base = app_url.trim_end_matches('/');
        Self {
            version: "next".to_string(),
            image_url: format!("{}/images/feed.png", base),
            button: EmbedButton {
                title: format!("Play {}", APP_NAME),
                action: EmbedAction {
                    kind: "launch_frame".to_string(),
                    name: APP_NAME.to_string(),
                    url: base.to_string(),
                    splash_image_url: format!("{}/images/splash.png", base),
                    splash_background_color: EMBED_SPLASH_BACKGROUND.to_string(),
                },
            },
        }
    }

    /// Compact JSON for the meta tag's `content` attribute
    pub fn meta_content(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_manifest_field_names() {
        let json = serde_json::to_value(FrameManifest::for_app("https://jump.example/")).unwrap();
        let assoc = &json["accountAssociation"];
        for key in ["header", "payload", "signature"] {
            assert_eq!(assoc[key], Value::String(String::new()));
        }
        let frame = &json["frame"];
        for key in [
            "name",
            "version",
            "iconUrl",
            "homeUrl",
            "imageUrl",
            "splashImageUrl",
            "splashBackgroundColor",
            "webhookUrl",
            "description",
            "primaryCategory",
            "heroImageUrl",
            "screenshotUrls",
            "subtitle",
        ] {
            assert!(!frame[key].is_null(), "missing {}", key);
        }
        assert_eq!(frame["homeUrl"], "https://jump.example");
        assert_eq!(frame["webhookUrl"], "https://jump.example/api/webhook");
        assert_eq!(frame["primaryCategory"], "games");
    }

    #[test]
    fn test_embed_shape() {
        let embed = FrameEmbed::for_app(DEFAULT_APP_URL);
        let json: Value = serde_json::from_str(&embed.meta_content().unwrap()).unwrap();
        assert_eq!(json["version"], "next");
        assert_eq!(json["imageUrl"], "http://localhost:3000/images/feed.png");
        let action = &json["button"]["action"];
        assert_eq!(action["type"], "launch_frame");
        assert_eq!(action["url"], "http://localhost:3000");
        assert_eq!(action["splashImageUrl"], "http://localhost:3000/images/splash.png");
        assert_eq!(action["splashBackgroundColor"], "#ff69b4");
        assert!(json["button"]["title"].as_str().unwrap().starts_with("Play"));
    }
}
