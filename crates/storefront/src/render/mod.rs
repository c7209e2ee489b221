//! Block rendering: the dispatch table from block variants to HTML.
//!
//! Each [`Block`] variant maps to exactly one Askama partial. Page routes
//! walk a [`crate::cms::blocks::Layout`], pre-fetch whatever catalog data a
//! block needs (only archive blocks need any), render each block to an HTML
//! string here, and hand the ordered strings to the page template. Rich text
//! fields are markdown and are rendered to HTML before they reach a
//! template; templates interpolate them with `|safe`.

pub mod markdown;

use askama::Template;

use oakline_core::Slug;

use crate::cms::blocks::{
    Block, ColumnWidth, FaqItem, Hero, HeroImpact, Link, LinkAppearance, MediaRef, RichText,
    Testimonial,
};
use crate::cms::documents::ProductData;
use crate::render::markdown::render_markdown;

// =============================================================================
// View models
// =============================================================================

/// A resolved link, ready for a template.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub class: &'static str,
}

impl LinkView {
    fn from_link(link: &Link) -> Self {
        Self {
            label: link.label.clone(),
            href: link.href(),
            class: match link.appearance {
                LinkAppearance::Default => "link",
                LinkAppearance::Primary => "button button-primary",
                LinkAppearance::Secondary => "button button-secondary",
            },
        }
    }
}

/// A resolved image. Built only from media references that still resolve;
/// dangling references simply produce no view.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ImageView {
    fn from_media(media: &MediaRef) -> Option<Self> {
        media.resolved().map(|(url, alt)| Self {
            url: url.to_string(),
            alt: alt.to_string(),
        })
    }
}

/// A product as shown in archive grids and search results.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub title: String,
    pub href: String,
    pub image: Option<ImageView>,
    pub price: String,
    /// Sale price display, present only while a sale is active.
    pub sale_price: Option<String>,
    /// Whole-percent discount badge, present only when it rounds to >= 1%.
    pub percent_off: Option<u8>,
}

impl ProductCard {
    /// Build a card from a product document's slug and payload.
    #[must_use]
    pub fn from_product(slug: &Slug, data: &ProductData) -> Self {
        let sale = data.active_sale_price();
        Self {
            title: data.title.clone(),
            href: format!("/products/{slug}"),
            image: data.gallery.first().and_then(ImageView::from_media),
            price: data.price.display(),
            sale_price: sale.map(|p| p.display()),
            percent_off: sale.and_then(|p| data.price.percent_off(p)),
        }
    }
}

fn rich_html(text: &RichText) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(render_markdown(&text.0))
    }
}

// =============================================================================
// Hero
// =============================================================================

#[derive(Template)]
#[template(path = "partials/hero.html")]
struct HeroTemplate {
    impact_class: &'static str,
    body_html: Option<String>,
    links: Vec<LinkView>,
    image: Option<ImageView>,
}

/// Render the page hero. `HeroImpact::None` renders nothing.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_hero(hero: &Hero) -> askama::Result<Option<String>> {
    let impact_class = match hero.impact {
        HeroImpact::None => return Ok(None),
        HeroImpact::Low => "hero hero-low",
        HeroImpact::Medium => "hero hero-medium",
        HeroImpact::High => "hero hero-high",
    };

    let template = HeroTemplate {
        impact_class,
        body_html: hero.rich_text.as_ref().and_then(rich_html),
        links: hero.links.iter().map(LinkView::from_link).collect(),
        image: hero.media.as_ref().and_then(ImageView::from_media),
    };
    template.render().map(Some)
}

// =============================================================================
// Block partials
// =============================================================================

#[derive(Template)]
#[template(path = "blocks/call_to_action.html")]
struct CallToActionTemplate {
    section_id: Option<String>,
    body_html: Option<String>,
    links: Vec<LinkView>,
}

struct ColumnView {
    width_class: &'static str,
    body_html: String,
    link: Option<LinkView>,
}

#[derive(Template)]
#[template(path = "blocks/content.html")]
struct ContentTemplate {
    section_id: Option<String>,
    columns: Vec<ColumnView>,
}

#[derive(Template)]
#[template(path = "blocks/media.html")]
struct MediaTemplate {
    section_id: Option<String>,
    image: Option<ImageView>,
    caption_html: Option<String>,
}

#[derive(Template)]
#[template(path = "blocks/banner.html")]
struct BannerTemplate {
    section_id: Option<String>,
    style_class: &'static str,
    body_html: Option<String>,
}

#[derive(Template)]
#[template(path = "blocks/archive.html")]
struct ArchiveTemplate {
    section_id: Option<String>,
    intro_html: Option<String>,
    products: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "blocks/testimonials.html")]
struct TestimonialsTemplate {
    section_id: Option<String>,
    title: Option<String>,
    items: Vec<Testimonial>,
}

struct FaqView {
    question: String,
    answer_html: String,
}

#[derive(Template)]
#[template(path = "blocks/faq.html")]
struct FaqTemplate {
    section_id: Option<String>,
    title: Option<String>,
    items: Vec<FaqView>,
}

#[derive(Template)]
#[template(path = "blocks/logo_grid.html")]
struct LogoGridTemplate {
    section_id: Option<String>,
    title: Option<String>,
    logos: Vec<ImageView>,
}

struct StepView {
    title: String,
    text_html: String,
}

#[derive(Template)]
#[template(path = "blocks/steps.html")]
struct StepsTemplate {
    section_id: Option<String>,
    title: Option<String>,
    items: Vec<StepView>,
}

#[derive(Template)]
#[template(path = "blocks/newsletter.html")]
struct NewsletterTemplate {
    section_id: Option<String>,
    heading: String,
    subheading: Option<String>,
    button_label: String,
}

struct TierView {
    name: String,
    price: String,
    interval: Option<String>,
    features: Vec<String>,
    link: Option<LinkView>,
    highlighted: bool,
}

#[derive(Template)]
#[template(path = "blocks/pricing.html")]
struct PricingTemplate {
    section_id: Option<String>,
    title: Option<String>,
    tiers: Vec<TierView>,
}

#[derive(Template)]
#[template(path = "blocks/contact.html")]
struct ContactTemplate {
    section_id: Option<String>,
    heading: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    hours: Option<String>,
}

/// Render a single block to HTML.
///
/// `products` carries the pre-fetched catalog data for archive blocks and is
/// ignored by every other variant (they are self-contained).
///
/// # Errors
///
/// Returns an error if the block's template fails to render.
#[allow(clippy::too_many_lines)]
pub fn render_block(block: &Block, products: &[ProductCard]) -> askama::Result<String> {
    match block {
        Block::CallToAction {
            section_id,
            rich_text,
            links,
        } => CallToActionTemplate {
            section_id: section_id.clone(),
            body_html: rich_html(rich_text),
            links: links.iter().map(LinkView::from_link).collect(),
        }
        .render(),

        Block::Content {
            section_id,
            columns,
        } => ContentTemplate {
            section_id: section_id.clone(),
            columns: columns
                .iter()
                .map(|col| ColumnView {
                    width_class: match col.width {
                        ColumnWidth::OneThird => "col col-one-third",
                        ColumnWidth::Half => "col col-half",
                        ColumnWidth::TwoThirds => "col col-two-thirds",
                        ColumnWidth::Full => "col col-full",
                    },
                    body_html: rich_html(&col.rich_text).unwrap_or_default(),
                    link: col.link.as_ref().map(LinkView::from_link),
                })
                .collect(),
        }
        .render(),

        Block::Media {
            section_id,
            media,
            caption,
        } => MediaTemplate {
            section_id: section_id.clone(),
            image: ImageView::from_media(media),
            caption_html: caption.as_ref().and_then(rich_html),
        }
        .render(),

        Block::Banner {
            section_id,
            style,
            content,
        } => BannerTemplate {
            section_id: section_id.clone(),
            style_class: match style {
                crate::cms::blocks::BannerStyle::Info => "banner banner-info",
                crate::cms::blocks::BannerStyle::Success => "banner banner-success",
                crate::cms::blocks::BannerStyle::Warning => "banner banner-warning",
                crate::cms::blocks::BannerStyle::Error => "banner banner-error",
            },
            body_html: rich_html(content),
        }
        .render(),

        Block::Archive {
            section_id, intro, ..
        } => ArchiveTemplate {
            section_id: section_id.clone(),
            intro_html: intro.as_ref().and_then(rich_html),
            products: products.to_vec(),
        }
        .render(),

        Block::Testimonials {
            section_id,
            title,
            items,
        } => TestimonialsTemplate {
            section_id: section_id.clone(),
            title: title.clone(),
            items: items.clone(),
        }
        .render(),

        Block::Faq {
            section_id,
            title,
            items,
        } => FaqTemplate {
            section_id: section_id.clone(),
            title: title.clone(),
            items: items
                .iter()
                .map(|FaqItem { question, answer }| FaqView {
                    question: question.clone(),
                    answer_html: rich_html(answer).unwrap_or_default(),
                })
                .collect(),
        }
        .render(),

        Block::LogoGrid {
            section_id,
            title,
            logos,
        } => LogoGridTemplate {
            section_id: section_id.clone(),
            title: title.clone(),
            logos: logos.iter().filter_map(ImageView::from_media).collect(),
        }
        .render(),

        Block::Steps {
            section_id,
            title,
            items,
        } => StepsTemplate {
            section_id: section_id.clone(),
            title: title.clone(),
            items: items
                .iter()
                .map(|step| StepView {
                    title: step.title.clone(),
                    text_html: rich_html(&step.text).unwrap_or_default(),
                })
                .collect(),
        }
        .render(),

        Block::Newsletter {
            section_id,
            heading,
            subheading,
            button_label,
        } => NewsletterTemplate {
            section_id: section_id.clone(),
            heading: heading.clone(),
            subheading: subheading.clone(),
            button_label: button_label.clone(),
        }
        .render(),

        Block::Pricing {
            section_id,
            title,
            tiers,
        } => PricingTemplate {
            section_id: section_id.clone(),
            title: title.clone(),
            tiers: tiers
                .iter()
                .map(|tier| TierView {
                    name: tier.name.clone(),
                    price: tier.price.display(),
                    interval: tier.interval.clone(),
                    features: tier.features.clone(),
                    link: tier.link.as_ref().map(LinkView::from_link),
                    highlighted: tier.highlighted,
                })
                .collect(),
        }
        .render(),

        Block::Contact {
            section_id,
            heading,
            email,
            phone,
            address,
            hours,
        } => ContactTemplate {
            section_id: section_id.clone(),
            heading: heading.clone(),
            email: email.clone(),
            phone: phone.clone(),
            address: address.clone(),
            hours: hours.clone(),
        }
        .render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::blocks::{BannerStyle, Layout};
    use oakline_core::Price;
    use serde_json::json;

    #[test]
    fn test_banner_renders_markdown_content() {
        let block = Block::Banner {
            section_id: Some("promo".to_string()),
            style: BannerStyle::Success,
            content: RichText("**Free shipping** this week".to_string()),
        };
        let html = render_block(&block, &[]).expect("render");
        assert!(html.contains("banner-success"));
        assert!(html.contains("id=\"promo\""));
        assert!(html.contains("<strong>Free shipping</strong>"));
    }

    #[test]
    fn test_testimonial_quote_appears() {
        let block = Block::Testimonials {
            section_id: None,
            title: Some("What customers say".to_string()),
            items: vec![Testimonial {
                quote: "Best barrel I ever bought".to_string(),
                author: "M. Ferreira".to_string(),
                role: Some("Home distiller".to_string()),
            }],
        };
        let html = render_block(&block, &[]).expect("render");
        assert!(html.contains("Best barrel I ever bought"));
        assert!(html.contains("M. Ferreira"));
    }

    #[test]
    fn test_every_block_variant_renders() {
        // Registry-default instances of all twelve variants must have a
        // working dispatch arm and template.
        for tag in Block::TAGS {
            let block: Block =
                serde_json::from_value(json!({ "blockType": tag })).expect("defaults decode");
            let html = render_block(&block, &[]).unwrap_or_else(|e| panic!("{tag}: {e}"));
            assert!(!html.is_empty(), "{tag} rendered nothing");
        }
    }

    #[test]
    fn test_unknown_block_never_reaches_renderer() {
        let layout: Layout = serde_json::from_value(json!([
            { "blockType": "wormholePortal", "radius": 3 }
        ]))
        .expect("lenient decode");
        assert!(layout.is_empty());
    }

    #[test]
    fn test_archive_renders_product_cards() {
        let block = Block::Archive {
            section_id: None,
            intro: None,
            populate_by: crate::cms::blocks::PopulateBy::Collection,
            categories: vec![],
            selection: vec![],
            limit: 6,
        };
        let cards = vec![ProductCard {
            title: "Oak Barrel".to_string(),
            href: "/products/oak-barrel".to_string(),
            image: None,
            price: "$100.00".to_string(),
            sale_price: Some("$75.00".to_string()),
            percent_off: Some(25),
        }];
        let html = render_block(&block, &cards).expect("render");
        assert!(html.contains("Oak Barrel"));
        assert!(html.contains("/products/oak-barrel"));
        assert!(html.contains("$75.00"));
        assert!(html.contains("25%"));
    }

    #[test]
    fn test_hero_none_impact_renders_nothing() {
        let hero = Hero::default();
        assert!(render_hero(&hero).expect("render").is_none());
    }

    #[test]
    fn test_hero_high_impact_renders() {
        let hero = Hero {
            impact: HeroImpact::High,
            rich_text: Some(RichText("# Welcome".to_string())),
            links: vec![Link {
                label: "Shop now".to_string(),
                url: Some("/search".to_string()),
                ..Link::default()
            }],
            media: None,
        };
        let html = render_hero(&hero).expect("render").expect("some");
        assert!(html.contains("hero-high"));
        assert!(html.contains("Welcome"));
        assert!(html.contains("Shop now"));
    }

    #[test]
    fn test_product_card_sale_fields() {
        let data = ProductData {
            title: "Oak Barrel".to_string(),
            price: Price::from_cents(10_000),
            sale_price: Some(Price::from_cents(7_500)),
            on_sale: true,
            ..ProductData::default()
        };
        let slug = Slug::parse("oak-barrel").expect("valid");
        let card = ProductCard::from_product(&slug, &data);
        assert_eq!(card.price, "$100.00");
        assert_eq!(card.sale_price.as_deref(), Some("$75.00"));
        assert_eq!(card.percent_off, Some(25));
    }
}
