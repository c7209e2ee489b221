//! The block schema registry and shared field builders.
//!
//! Pages are composed from a closed set of content blocks. Each block type
//! is one variant of [`Block`], discriminated by the `blockType` tag in the
//! stored JSON; each variant declares its own editable fields and nothing
//! else. Blocks are independent of each other — there is no cross-block
//! validation — and adding a block type means one new variant, one template,
//! and one dispatch arm in [`crate::render`].
//!
//! [`Layout`] is deliberately lenient: an element whose tag (or shape) the
//! registry doesn't recognize is dropped at decode time and never rendered,
//! so a page authored against a newer schema still serves.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use oakline_core::{DocumentId, Price, Slug};

// =============================================================================
// Field builders — reusable fragments shared by many blocks
// =============================================================================

/// Link appearance option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAppearance {
    #[default]
    Default,
    Primary,
    Secondary,
}

/// A link field: label plus either an internal page slug or an external URL,
/// with an optional in-page anchor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub label: String,
    /// External destination. Takes precedence when both are set.
    pub url: Option<String>,
    /// Internal page reference by slug.
    pub page: Option<Slug>,
    /// Optional `#anchor` appended to the destination.
    pub anchor: Option<String>,
    pub appearance: LinkAppearance,
}

impl Link {
    /// Resolve the href this link points at.
    #[must_use]
    pub fn href(&self) -> String {
        let base = match (&self.url, &self.page) {
            (Some(url), _) => url.clone(),
            (None, Some(page)) => format!("/pages/{page}"),
            (None, None) => "/".to_string(),
        };
        match &self.anchor {
            Some(anchor) if !anchor.is_empty() => format!("{base}#{anchor}"),
            _ => base,
        }
    }
}

/// Markdown rich text. Rendered to HTML by [`crate::render::markdown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub String);

impl RichText {
    /// Whether there is anything to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// A reference to an uploaded media document, denormalized with the resolved
/// URL and alt text at authoring time.
///
/// When the underlying media document has been deleted the `url` is absent;
/// presentational templates render nothing for the sub-element instead of
/// failing the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaRef {
    pub media: Option<DocumentId>,
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl MediaRef {
    /// URL and alt text, when the reference still resolves.
    #[must_use]
    pub fn resolved(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        Some((url, self.alt.as_deref().unwrap_or("")))
    }
}

// =============================================================================
// Hero — the distinguished, always-first section, configured separately
// =============================================================================

/// How much vertical space and emphasis the hero takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroImpact {
    /// No hero rendered at all.
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// Hero configuration for a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub impact: HeroImpact,
    pub rich_text: Option<RichText>,
    pub links: Vec<Link>,
    pub media: Option<MediaRef>,
}

// =============================================================================
// Block variants
// =============================================================================

/// One column inside a [`Block::Content`] block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentColumn {
    pub width: ColumnWidth,
    pub rich_text: RichText,
    pub link: Option<Link>,
}

/// Column width option for content blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    OneThird,
    Half,
    TwoThirds,
    #[default]
    Full,
}

/// Banner emphasis style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerStyle {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// How an archive block selects the products it showcases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulateBy {
    /// Newest products, optionally narrowed to categories.
    #[default]
    Collection,
    /// An explicit hand-picked selection.
    Selection,
}

/// A single testimonial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
}

/// A question/answer pair in an FAQ block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub question: String,
    pub answer: RichText,
}

/// One numbered step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    pub title: String,
    pub text: RichText,
}

/// One tier in a pricing table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingTier {
    pub name: String,
    pub price: Price,
    /// Billing interval label, e.g. "month".
    pub interval: Option<String>,
    pub features: Vec<String>,
    pub link: Option<Link>,
    pub highlighted: bool,
}

/// The closed set of content block types, discriminated by `blockType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "blockType", rename_all = "camelCase")]
pub enum Block {
    /// Rich text with prominent action links.
    #[serde(rename_all = "camelCase")]
    CallToAction {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        rich_text: RichText,
        #[serde(default)]
        links: Vec<Link>,
    },
    /// Free-form rich text laid out in columns.
    #[serde(rename_all = "camelCase")]
    Content {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        columns: Vec<ContentColumn>,
    },
    /// A single image or embed with an optional caption.
    #[serde(rename_all = "camelCase")]
    Media {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        media: MediaRef,
        #[serde(default)]
        caption: Option<RichText>,
    },
    /// An emphasized notice strip.
    #[serde(rename_all = "camelCase")]
    Banner {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        style: BannerStyle,
        #[serde(default)]
        content: RichText,
    },
    /// A product showcase, populated from the catalog.
    #[serde(rename_all = "camelCase")]
    Archive {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        intro: Option<RichText>,
        #[serde(default)]
        populate_by: PopulateBy,
        /// Category filter when populating by collection.
        #[serde(default)]
        categories: Vec<DocumentId>,
        /// Hand-picked products when populating by selection.
        #[serde(default)]
        selection: Vec<DocumentId>,
        #[serde(default = "default_archive_limit")]
        limit: u32,
    },
    /// Customer quotes.
    #[serde(rename_all = "camelCase")]
    Testimonials {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        items: Vec<Testimonial>,
    },
    /// Question/answer accordion.
    #[serde(rename_all = "camelCase")]
    Faq {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        items: Vec<FaqItem>,
    },
    /// A grid of partner/press logos.
    #[serde(rename_all = "camelCase")]
    LogoGrid {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        logos: Vec<MediaRef>,
    },
    /// Numbered how-it-works steps.
    #[serde(rename_all = "camelCase")]
    Steps {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        items: Vec<Step>,
    },
    /// Newsletter signup prompt.
    #[serde(rename_all = "camelCase")]
    Newsletter {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        heading: String,
        #[serde(default)]
        subheading: Option<String>,
        #[serde(default = "default_newsletter_button")]
        button_label: String,
    },
    /// Tiered pricing table.
    #[serde(rename_all = "camelCase")]
    Pricing {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        tiers: Vec<PricingTier>,
    },
    /// Contact details.
    #[serde(rename_all = "camelCase")]
    Contact {
        #[serde(default)]
        section_id: Option<String>,
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        phone: Option<String>,
        #[serde(default)]
        address: Option<String>,
        #[serde(default)]
        hours: Option<String>,
    },
}

const fn default_archive_limit() -> u32 {
    6
}

fn default_newsletter_button() -> String {
    "Subscribe".to_string()
}

impl Block {
    /// Every valid `blockType` discriminator, in registry order.
    pub const TAGS: [&'static str; 12] = [
        "callToAction",
        "content",
        "media",
        "banner",
        "archive",
        "testimonials",
        "faq",
        "logoGrid",
        "steps",
        "newsletter",
        "pricing",
        "contact",
    ];

    /// The `blockType` discriminator of this block.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::CallToAction { .. } => "callToAction",
            Self::Content { .. } => "content",
            Self::Media { .. } => "media",
            Self::Banner { .. } => "banner",
            Self::Archive { .. } => "archive",
            Self::Testimonials { .. } => "testimonials",
            Self::Faq { .. } => "faq",
            Self::LogoGrid { .. } => "logoGrid",
            Self::Steps { .. } => "steps",
            Self::Newsletter { .. } => "newsletter",
            Self::Pricing { .. } => "pricing",
            Self::Contact { .. } => "contact",
        }
    }

    /// The optional anchor id shared by every block via the section-id field.
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::CallToAction { section_id, .. }
            | Self::Content { section_id, .. }
            | Self::Media { section_id, .. }
            | Self::Banner { section_id, .. }
            | Self::Archive { section_id, .. }
            | Self::Testimonials { section_id, .. }
            | Self::Faq { section_id, .. }
            | Self::LogoGrid { section_id, .. }
            | Self::Steps { section_id, .. }
            | Self::Newsletter { section_id, .. }
            | Self::Pricing { section_id, .. }
            | Self::Contact { section_id, .. } => section_id.as_deref(),
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// An ordered sequence of block instances.
///
/// Deserialization is element-wise and lenient: any element that fails to
/// decode as a known block is dropped with a debug log. An unresolved block
/// type is a silent no-render, not an error.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Layout(pub Vec<Block>);

impl Layout {
    /// Iterate blocks in render order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Block>> for Layout {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<Value> = Vec::deserialize(deserializer)?;
        let blocks = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Block>(value.clone()) {
                Ok(block) => Some(block),
                Err(err) => {
                    let tag = value
                        .get("blockType")
                        .and_then(Value::as_str)
                        .unwrap_or("<missing>");
                    tracing::debug!(block_type = tag, error = %err, "Skipping unresolved block");
                    None
                }
            })
            .collect();
        Ok(Self(blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_tag_deserializes_to_its_variant() {
        for tag in Block::TAGS {
            let value = json!({ "blockType": tag });
            let block: Block = serde_json::from_value(value)
                .unwrap_or_else(|e| panic!("tag {tag} should decode with defaults: {e}"));
            assert_eq!(block.tag(), tag);
        }
    }

    #[test]
    fn test_tags_are_unique() {
        let mut tags = Block::TAGS.to_vec();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Block::TAGS.len());
    }

    #[test]
    fn test_layout_skips_unknown_block_type() {
        let value = json!([
            { "blockType": "banner", "content": "Free shipping this week" },
            { "blockType": "holographicSpinner", "rpm": 33 },
            { "blockType": "faq", "items": [{ "question": "Q", "answer": "A" }] }
        ]);
        let layout: Layout = serde_json::from_value(value).expect("lenient decode");
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.0.first().map(Block::tag), Some("banner"));
        assert_eq!(layout.0.get(1).map(Block::tag), Some("faq"));
    }

    #[test]
    fn test_layout_preserves_order() {
        let value = json!([
            { "blockType": "content" },
            { "blockType": "testimonials" },
            { "blockType": "newsletter" }
        ]);
        let layout: Layout = serde_json::from_value(value).expect("decode");
        let tags: Vec<_> = layout.iter().map(Block::tag).collect();
        assert_eq!(tags, ["content", "testimonials", "newsletter"]);
    }

    #[test]
    fn test_link_href_resolution() {
        let external = Link {
            label: "Docs".to_string(),
            url: Some("https://example.com/docs".to_string()),
            ..Link::default()
        };
        assert_eq!(external.href(), "https://example.com/docs");

        let internal = Link {
            label: "About".to_string(),
            page: Some(Slug::parse("about").expect("valid")),
            anchor: Some("team".to_string()),
            ..Link::default()
        };
        assert_eq!(internal.href(), "/pages/about#team");

        assert_eq!(Link::default().href(), "/");
    }

    #[test]
    fn test_media_ref_dangling_resolves_to_none() {
        let dangling = MediaRef {
            media: Some(DocumentId::generate()),
            url: None,
            alt: Some("gone".to_string()),
        };
        assert!(dangling.resolved().is_none());

        let empty_url = MediaRef {
            url: Some(String::new()),
            ..MediaRef::default()
        };
        assert!(empty_url.resolved().is_none());

        let live = MediaRef {
            media: None,
            url: Some("/static/images/barrel.jpg".to_string()),
            alt: Some("Oak barrel".to_string()),
        };
        assert_eq!(live.resolved(), Some(("/static/images/barrel.jpg", "Oak barrel")));
    }

    #[test]
    fn test_hero_defaults_to_no_render() {
        let hero: Hero = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(hero.impact, HeroImpact::None);
    }

    #[test]
    fn test_archive_defaults() {
        let value = json!({ "blockType": "archive" });
        let Block::Archive {
            populate_by, limit, ..
        } = serde_json::from_value(value).expect("decode")
        else {
            panic!("expected archive variant");
        };
        assert_eq!(populate_by, PopulateBy::Collection);
        assert_eq!(limit, 6);
    }
}
