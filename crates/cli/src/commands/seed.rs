//! Seed demo content into the document store.
//!
//! Creates a home page and an about page composed from blocks, a footer
//! global, a category, and a handful of products. With `--push`, products
//! are also pushed to the payment provider so both systems know about them
//! from the start.

use tracing::info;

use oakline_core::{DocumentStatus, Price, Slug};
use oakline_storefront::cms::blocks::{
    Block, ContentColumn, FaqItem, Hero, HeroImpact, Link, LinkAppearance, PopulateBy, RichText,
    Step, Testimonial,
};
use oakline_storefront::cms::collections;
use oakline_storefront::cms::documents::{
    CategoryData, Document, FooterColumn, FooterData, FooterLink, PageData, ProductData,
};
use oakline_storefront::cms::store::{MutationCtx, Store};
use oakline_storefront::config::StorefrontConfig;
use oakline_storefront::services::catalog;
use oakline_storefront::services::payments::PaymentsClient;

/// Seed the database with demo content.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run(push: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let store = Store::postgres(pool);
    let ctx = MutationCtx::local();

    let payments = if push {
        let config = StorefrontConfig::from_env()?;
        Some(PaymentsClient::new(&config.payments)?)
    } else {
        None
    };

    // Category
    let barrels = Document::new(
        collections::CATEGORIES,
        Some(slug("barrels")?),
        DocumentStatus::Published,
        &CategoryData {
            title: "Barrels".to_string(),
            description: Some("Aging barrels in every size".to_string()),
        },
    )?;
    let barrels_id = barrels.id;
    store.create(&ctx, barrels).await?;
    info!("Seeded category: barrels");

    // Products
    let products = [
        ("Oak Barrel", "oak-barrel", 10_000, Some(7_500), 12),
        ("Barrel Stand", "barrel-stand", 4_500, None, 30),
        ("Char Sampler Kit", "char-sampler-kit", 2_999, None, 50),
    ];
    for (title, slug_str, cents, sale, stock) in products {
        let data = ProductData {
            title: title.to_string(),
            description: format!("{title} from our Oregon workshop.\n\nHand finished."),
            price: Price::from_cents(cents),
            sale_price: sale.map(Price::from_cents),
            on_sale: sale.is_some(),
            active: true,
            stock,
            categories: vec![barrels_id],
            ..ProductData::default()
        };
        catalog::create_product(
            &store,
            payments.as_ref(),
            Some(slug(slug_str)?),
            data,
            DocumentStatus::Published,
        )
        .await?;
        info!(product = title, "Seeded product");
    }

    // Home page
    let home = PageData {
        title: "Oakline Supply Co.".to_string(),
        description: Some("Small-batch oak aging barrels and accessories".to_string()),
        hero: Hero {
            impact: HeroImpact::High,
            rich_text: Some(RichText(
                "# Age it in oak\n\nSmall-batch barrels, staves and char kits.".to_string(),
            )),
            links: vec![Link {
                label: "Shop the catalog".to_string(),
                url: Some("/search".to_string()),
                appearance: LinkAppearance::Primary,
                ..Link::default()
            }],
            media: None,
        },
        layout: vec![
            Block::Archive {
                section_id: Some("featured".to_string()),
                intro: Some(RichText("## Fresh from the workshop".to_string())),
                populate_by: PopulateBy::Collection,
                categories: vec![],
                selection: vec![],
                limit: 6,
            },
            Block::Steps {
                section_id: None,
                title: Some("How it works".to_string()),
                items: vec![
                    Step {
                        title: "Pick a barrel".to_string(),
                        text: RichText("Sizes from 1L to 20L.".to_string()),
                    },
                    Step {
                        title: "Cure it".to_string(),
                        text: RichText("Fill with hot water for 24 hours.".to_string()),
                    },
                    Step {
                        title: "Age your batch".to_string(),
                        text: RichText("Smaller barrels age faster.".to_string()),
                    },
                ],
            },
            Block::Testimonials {
                section_id: None,
                title: Some("From our customers".to_string()),
                items: vec![Testimonial {
                    quote: "Best barrel I ever bought.".to_string(),
                    author: "M. Ferreira".to_string(),
                    role: Some("Home distiller".to_string()),
                }],
            },
            Block::Newsletter {
                section_id: None,
                heading: "Barrel notes, monthly".to_string(),
                subheading: Some("Aging guides and workshop news.".to_string()),
                button_label: "Subscribe".to_string(),
            },
        ]
        .into(),
    };
    store
        .create(
            &ctx,
            Document::new(
                collections::PAGES,
                Some(slug("home")?),
                DocumentStatus::Published,
                &home,
            )?,
        )
        .await?;
    info!("Seeded page: home");

    // About page
    let about = PageData {
        title: "About Oakline".to_string(),
        description: None,
        hero: Hero {
            impact: HeroImpact::Low,
            rich_text: Some(RichText("# About Oakline".to_string())),
            ..Hero::default()
        },
        layout: vec![
            Block::Content {
                section_id: None,
                columns: vec![ContentColumn {
                    rich_text: RichText(
                        "We have been coopering white oak in Oregon since 2014.".to_string(),
                    ),
                    ..ContentColumn::default()
                }],
            },
            Block::Faq {
                section_id: Some("faq".to_string()),
                title: Some("Common questions".to_string()),
                items: vec![FaqItem {
                    question: "Do barrels ship cured?".to_string(),
                    answer: RichText("No, cure on arrival. See our guide.".to_string()),
                }],
            },
        ]
        .into(),
    };
    store
        .create(
            &ctx,
            Document::new(
                collections::PAGES,
                Some(slug("about")?),
                DocumentStatus::Published,
                &about,
            )?,
        )
        .await?;
    info!("Seeded page: about");

    // Footer global
    let footer = FooterData {
        columns: vec![FooterColumn {
            heading: "Company".to_string(),
            links: vec![FooterLink {
                label: "About".to_string(),
                url: "/pages/about".to_string(),
            }],
        }],
        copyright: Some("Oakline Supply Co.".to_string()),
    };
    store
        .create(
            &ctx,
            Document::new(
                collections::GLOBALS,
                Some(slug("footer")?),
                DocumentStatus::Published,
                &footer,
            )?,
        )
        .await?;
    info!("Seeded global: footer");

    info!("Seeding complete");
    Ok(())
}

fn slug(s: &str) -> Result<Slug, Box<dyn std::error::Error>> {
    Ok(Slug::parse(s)?)
}
