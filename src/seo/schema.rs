//! schema.org JSON-LD documents for the organization, its office and the
//! price list

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::PriceItem;
use crate::helpers::full_url_for;

const CONTEXT: &str = "https://schema.org";

/// Which JSON-LD document to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Organization,
    LocalBusiness,
    OfferCatalog,
}

impl std::str::FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(SchemaKind::Organization),
            "local-business" => Ok(SchemaKind::LocalBusiness),
            "offer-catalog" => Ok(SchemaKind::OfferCatalog),
            other => Err(format!("unknown schema: {other}")),
        }
    }
}

fn logo_url(config: &SiteConfig) -> String {
    let logo = &config.organization.logo;
    if logo.starts_with("http://") || logo.starts_with("https://") {
        logo.clone()
    } else {
        full_url_for(config.base_url(), logo)
    }
}

/// `Organization` with a customer-support contact point
pub fn organization_schema(config: &SiteConfig) -> Value {
    let org = &config.organization;
    json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "name": org.name,
        "url": config.base_url(),
        "logo": logo_url(config),
        "description": org.description,
        "email": org.email,
        "telephone": org.phone,
        "sameAs": org.same_as,
        "contactPoint": [{
            "@type": "ContactPoint",
            "telephone": org.phone,
            "email": org.email,
            "contactType": "customer support",
            "areaServed": org.address.country,
            "availableLanguage": ["Russian"],
        }],
    })
}

/// `ProfessionalService` for the office: address, coordinates, hours.
///
/// `sameAs` lists the messenger profiles first, then the configured social
/// profiles that are not already present.
pub fn local_business_schema(config: &SiteConfig) -> Value {
    let org = &config.organization;
    let messenger = &config.messenger;

    let whatsapp: String = messenger
        .whatsapp_phone
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let mut same_as = vec![
        format!(
            "https://t.me/{}",
            messenger.telegram_username.trim_start_matches('@')
        ),
        format!("https://wa.me/{}", whatsapp),
    ];
    for profile in &org.same_as {
        if !same_as.contains(profile) {
            same_as.push(profile.clone());
        }
    }

    json!({
        "@context": CONTEXT,
        "@type": "ProfessionalService",
        "name": org.name,
        "image": logo_url(config),
        "url": config.base_url(),
        "telephone": org.phone,
        "email": org.email,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": org.address.street_address,
            "addressLocality": org.address.locality,
            "addressRegion": org.address.region,
            "postalCode": org.address.postal_code,
            "addressCountry": org.address.country,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": org.latitude,
            "longitude": org.longitude,
        },
        "openingHoursSpecification": [{
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": org.opening_days,
            "opens": org.opens,
            "closes": org.closes,
        }],
        "sameAs": same_as,
    })
}

/// `OfferCatalog` with one ruble-priced `Offer` per price-list row
pub fn offer_catalog_schema(config: &SiteConfig, items: &[PriceItem]) -> Value {
    let org = &config.organization;
    let base_url = config.base_url();

    let offers: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut price = json!({
                "@type": "PriceSpecification",
                "price": item.price,
                "priceCurrency": "RUB",
                "unitText": item.unit,
            });
            if item.price_from {
                price["priceType"] = json!("StartingFrom");
            }

            json!({
                "@type": "Offer",
                "position": index + 1,
                "itemOffered": {
                    "@type": "Service",
                    "name": item.title,
                    "description": item.description,
                    "category": item.category,
                    "provider": {
                        "@type": "Organization",
                        "name": org.name,
                        "url": base_url,
                    },
                },
                "priceSpecification": price,
                "availability": "https://schema.org/InStock",
            })
        })
        .collect();

    json!({
        "@context": CONTEXT,
        "@type": "OfferCatalog",
        "name": format!("{} Legal + Tech Price List", org.name),
        "url": full_url_for(base_url, "/price"),
        "numberOfItems": items.len(),
        "itemListElement": offers,
    })
}
