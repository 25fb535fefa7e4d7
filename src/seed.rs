use crate::helpers::slug;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::Instrument;

pub struct SeedCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub slug: &'static str,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SeedError {
    #[error("duplicate slug in seed data: {0}")]
    DuplicateSlug(String),
    #[error("{0}")]
    Database(String),
}

pub struct SeedReport {
    pub categories: usize,
    pub tags: usize,
}

pub const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Work and Productivity",
        description: "Tools to enhance efficiency and organization.",
        slug: "work-and-productivity",
    },
    SeedCategory {
        name: "Engineering and Development",
        description: "Resources for software builders.",
        slug: "engineering-and-development",
    },
    SeedCategory {
        name: "Design",
        description: "Creative tools for designers and artists.",
        slug: "design",
    },
    SeedCategory {
        name: "Social and Communities",
        description: "Platforms to connect and share.",
        slug: "social-and-communities",
    },
    SeedCategory {
        name: "Finance",
        description: "Financial management and planning tools.",
        slug: "finance",
    },
    SeedCategory {
        name: "Marketing",
        description: "Tools to promote and market services.",
        slug: "marketing",
    },
    SeedCategory {
        name: "Travel",
        description: "Apps for travel planning and booking.",
        slug: "travel",
    },
    SeedCategory {
        name: "Platforms",
        description: "Diverse utilities across digital platforms.",
        slug: "platforms",
    },
    SeedCategory {
        name: "Web3",
        description: "Next-gen decentralized web applications.",
        slug: "web3",
    },
    SeedCategory {
        name: "AI",
        description: "Artificial intelligence and machine learning tools.",
        slug: "ai",
    },
    SeedCategory {
        name: "Physical products",
        description: "Tangible goods across industries.",
        slug: "physical-products",
    },
    SeedCategory {
        name: "Ecommerce",
        description: "Online retail and commerce solutions.",
        slug: "ecommerce",
    },
    SeedCategory {
        name: "Addons",
        description: "Supplementary tools and extensions.",
        slug: "addons",
    },
];

pub const TAG_NAMES: &[&str] = &[
    "Ad blockers",
    "App switcher",
    "Calendar apps",
    "Customer support",
    "Email clients",
    "E-signature",
    "File storage and sharing",
    "Hiring software",
    "Knowledge base software",
    "Legal services",
    "Meeting software",
    "Note and writing apps",
    "Password managers",
    "PDF Editor",
    "Presentation Software",
    "Project management software",
    "Resume tools",
    "Scheduling software",
    "Screenshots and screen recording apps",
    "Search",
    "Spreadsheets",
    "Team collaboration software",
    "Time tracking apps",
    "Video conferencing",
    "Virtual office platforms",
    "Web browsers",
    "Writing assistants",
    "A/B testing",
    "AI coding assistants",
    "Authentication & identity",
    "Automation tools",
    "CMS",
    "Code editors",
    "Command line tools",
    "Data analysis tools",
    "Data visualization tools",
    "Git clients",
    "Headless CMS software",
    "Issue tracking software",
    "Membership software",
    "No-code platforms",
    "Security & Compliance",
    "Standup bots",
    "Static site generators",
    "Testing and QA",
    "Unified API",
    "Video hosting",
    "VPN client",
    "Web hosting services",
    "Website analytics",
    "Website builders",
    "3D & Animation",
    "Background removal tools",
    "Camera apps",
    "Design inspiration websites",
    "Design mockups",
    "Design resources",
    "Digital whiteboards",
    "Graphic design tools",
    "Icon sets",
    "Interface design tools",
    "Mobile editing apps",
    "Photo editing",
    "Podcasting",
    "Social audio apps",
    "Space design apps",
    "Stock photo sites",
    "UI frameworks",
    "User research",
    "Video editing",
    "Wallpapers",
    "Wireframing",
    "Blogging platforms",
    "Community management",
    "Dating apps",
    "Link in bio tools",
    "Live streaming platforms",
    "Messaging apps",
    "Microblogging platforms",
    "Newsletter platforms",
    "Photo sharing",
    "Professional networking platforms",
    "Safety and Privacy platforms",
    "Social bookmarking",
    "Social Networking",
    "Video and Voice calling",
    "Accounting software",
    "Budgeting apps",
    "Credit score tools",
    "Financial planning",
    "Fundraising resources",
    "Investing",
    "Invoicing tools",
    "Money transfer",
    "Neobanks",
    "Online banking",
    "Payroll software",
    "Remote workforce tools",
    "Retirement planning",
    "Savings apps",
    "Startup financial planning",
    "Stock trading platforms",
    "Tax preparation",
    "Advertising tools",
    "Affiliate marketing",
    "Business intelligence software",
    "CRM software",
    "Customer loyalty platforms",
    "Email marketing",
    "Influencer marketing platforms",
    "Keyword research tools",
    "Landing page builders",
    "Lead generation software",
    "Marketing automation platforms",
    "Sales Training",
    "SEO analysis tools",
    "Social media management tools",
    "Social media scheduling tools",
    "Survey and form builders",
    "Flight booking apps",
    "Hotel booking app",
    "Maps and GPS",
    "Outdoors platforms",
    "Short term rentals",
    "Travel apps",
    "Travel Insurance",
    "Travel Planning",
    "Weather apps",
    "Activity tracking",
    "Camping apps",
    "Health Insurance",
    "Hiking apps",
    "Medical",
    "Meditation apps",
    "Senior care",
    "Sleep apps",
    "Therapy apps",
    "Workout platforms",
    "Crowdfunding",
    "Event software",
    "Job boards",
    "Language Learning",
    "News",
    "Online learning",
    "Real estate",
    "Startup communities",
    "Virtual events",
    "Chrome Extensions",
    "Figma Plugins",
    "Figma Templates",
    "Notion Templates",
    "Slack apps",
    "Twitter apps",
    "Wordpress Plugins",
    "Wordpress themes",
    "Crypto exchanges",
    "Crypto tools",
    "Crypto wallets",
    "DAOs",
    "Defi",
    "NFT creation tools",
    "NFT marketplaces",
    "Mobile apps",
    "Hardware",
    "Home and Kitchen",
    "Lifestyle",
    "Music",
];

/// Rejects duplicate slugs instead of letting the unique constraint blow
/// up halfway through a partial seed. An earlier incarnation of this data
/// set shipped two categories sharing one slug, which made a whole
/// category unreachable by URL.
pub fn validate_unique_slugs<'a, I>(slugs: I) -> Result<(), SeedError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug.to_string()) {
            return Err(SeedError::DuplicateSlug(slug.to_string()));
        }
    }
    Ok(())
}

pub async fn run(pool: &PgPool) -> Result<SeedReport, SeedError> {
    validate_unique_slugs(CATEGORIES.iter().map(|category| category.slug))?;

    let tag_slugs: Vec<String> = TAG_NAMES.iter().map(|name| slug::kebab(name)).collect();
    validate_unique_slugs(tag_slugs.iter().map(|slug| slug.as_str()))?;

    let query_span = tracing::info_span!("Seeding categories and tags.");

    async {
        for category in CATEGORIES {
            sqlx::query(
                r#"
                INSERT INTO categories (name, description, slug)
                VALUES ($1, $2, $3)
                ON CONFLICT (slug) DO UPDATE
                SET name = EXCLUDED.name,
                    description = EXCLUDED.description
                "#,
            )
            .bind(category.name)
            .bind(category.description)
            .bind(category.slug)
            .execute(pool)
            .await?;
        }

        for (name, slug) in TAG_NAMES.iter().zip(tag_slugs.iter()) {
            sqlx::query(
                r#"
                INSERT INTO tags (name, slug)
                VALUES ($1, $2)
                ON CONFLICT (slug) DO UPDATE
                SET name = EXCLUDED.name
                "#,
            )
            .bind(name)
            .bind(slug)
            .execute(pool)
            .await?;
        }

        Ok::<(), sqlx::Error>(())
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to seed reference data, error: {:?}", err);
        SeedError::Database("Failed to seed".to_string())
    })?;

    Ok(SeedReport {
        categories: CATEGORIES.len(),
        tags: TAG_NAMES.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_category_slugs_are_distinct() {
        assert_eq!(
            validate_unique_slugs(CATEGORIES.iter().map(|category| category.slug)),
            Ok(())
        );
    }

    #[test]
    fn shipped_tag_slugs_are_distinct() {
        let slugs: Vec<String> = TAG_NAMES.iter().map(|name| slug::kebab(name)).collect();
        assert_eq!(
            validate_unique_slugs(slugs.iter().map(|slug| slug.as_str())),
            Ok(())
        );
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        // the defect shipped by the reference data set: two categories,
        // one slug
        let err = validate_unique_slugs(["marketing", "travel", "marketing"]).unwrap_err();
        assert_eq!(err, SeedError::DuplicateSlug("marketing".to_string()));
    }
}
