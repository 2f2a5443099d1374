//! Built-in content used when nothing has been persisted yet.

use std::collections::BTreeMap;

use crate::{
  document::{
    Branding, CURRENT_SCHEMA_VERSION, ContactInfo, FormPlaceholders, GalleryEntry, Hero,
    PackageCategory, ServicePackage, SiteDocument, UiLabels, WorkCategory,
  },
  language::Language,
};

/// Default storage key for the primary-language document.
pub const DEFAULT_STORAGE_KEY: &str = "bigboy_site_data_v2";

fn entry(
  id: &str,
  title: &str,
  category: WorkCategory,
  thumbnail: &str,
  description: &str,
  year: &str,
  video_url: Option<&str>,
) -> GalleryEntry {
  GalleryEntry {
    id:          id.to_owned(),
    title:       title.to_owned(),
    category,
    folder:      None,
    thumbnail:   thumbnail.to_owned(),
    video_url:   video_url.map(str::to_owned),
    description: description.to_owned(),
    year:        year.to_owned(),
  }
}

fn package(
  id: &str,
  name: &str,
  category: PackageCategory,
  price: &str,
  description: &str,
  features: &[&str],
  recommended: bool,
) -> ServicePackage {
  ServicePackage {
    id:             id.to_owned(),
    name:           name.to_owned(),
    category,
    price:          price.to_owned(),
    old_price:      None,
    discount_label: None,
    description:    description.to_owned(),
    features:       features.iter().map(|f| (*f).to_owned()).collect(),
    recommended,
  }
}

fn labels(pairs: &[(&str, &str)]) -> UiLabels {
  pairs
    .iter()
    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
    .collect()
}

fn gallery() -> Vec<GalleryEntry> {
  use WorkCategory::*;
  vec![
    entry(
      "vid-1",
      "When the World Sleeps",
      Cinematography,
      "https://img.youtube.com/vi/fmchWI8hVSA/maxresdefault.jpg",
      "A technical and artistic showcase of low-light cinematography, capturing the serene nocturnal atmosphere of the city.",
      "2024",
      Some("https://youtu.be/fmchWI8hVSA"),
    ),
    entry(
      "vid-2",
      "Family Christmas",
      Documentary,
      "https://img.youtube.com/vi/txDD8UdMlJM/maxresdefault.jpg",
      "An intimate documentary of a family gathering, focused on raw emotion and candid interactions.",
      "2023",
      Some("https://youtu.be/txDD8UdMlJM"),
    ),
    entry(
      "vid-3",
      "Inrichting op Maat",
      Commercial,
      "https://img.youtube.com/vi/c_vPvZcodhY/maxresdefault.jpg",
      "Commercial brand film for high-end interior design, focused on texture, material and craftsmanship.",
      "2024",
      Some("https://youtu.be/c_vPvZcodhY"),
    ),
    entry(
      "vid-4",
      "Jean-Pierre: The Artist",
      Cinematography,
      "https://img.youtube.com/vi/crk9L3lpGoI/maxresdefault.jpg",
      "A narrative-driven short film blending humor with cinematic aesthetics.",
      "2024",
      Some("https://youtube.com/shorts/crk9L3lpGoI?feature=share"),
    ),
    entry(
      "photo-1",
      "Dom Tower Portrait",
      Photography,
      "https://images.unsplash.com/photo-1549643276-fdf2fab574f5?auto=format&fit=crop&q=80&w=800&h=1200",
      "Architectural study in the heart of Utrecht.",
      "2023",
      None,
    ),
    entry(
      "photo-2",
      "Studio Minimal",
      Photography,
      "https://images.unsplash.com/photo-1534067783941-51c9c23ecefd?auto=format&fit=crop&q=80&w=800&h=800",
      "High-contrast studio lighting techniques.",
      "2023",
      None,
    ),
    entry(
      "photo-3",
      "Neon Nights",
      Photography,
      "https://images.unsplash.com/photo-1514525253440-b393452e8d26?auto=format&fit=crop&q=80&w=800",
      "Low light event photography capturing the atmosphere.",
      "2024",
      None,
    ),
    entry(
      "photo-4",
      "Corporate Headshots",
      Photography,
      "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&q=80&w=800",
      "Clean, professional branding imagery for LinkedIn.",
      "2024",
      None,
    ),
    entry(
      "photo-5",
      "Product Detail",
      Photography,
      "https://images.unsplash.com/photo-1523275335684-37898b6baf30?auto=format&fit=crop&q=80&w=800",
      "Macro photography for e-commerce.",
      "2023",
      None,
    ),
  ]
}

/// The built-in English document.
pub fn default_document() -> SiteDocument {
  use PackageCategory::*;
  SiteDocument {
    schema_version: CURRENT_SCHEMA_VERSION,
    branding:       Branding {
      name:        "BIGBOY PRODUCTIONS".to_owned(),
      description: "An independent creative studio based in Utrecht, serving clients across the Randstad with high-fidelity visuals.".to_owned(),
    },
    hero:           Hero {
      title_top:            "BIGBOY".to_owned(),
      title_bottom:         "PRODUCTIONS".to_owned(),
      subtitle:             "Independent Director of Photography & Photographer. Crafting high-end visual narratives for brands in the Randstad and beyond.".to_owned(),
      background_url:       "https://images.unsplash.com/photo-1493238792000-8113da705763?auto=format&fit=crop&q=80&w=1920".to_owned(),
      background_video_url: Some("content/video/hero-bg.mp4".to_owned()),
      showreel_video_url:   Some("https://youtu.be/fmchWI8hVSA".to_owned()),
    },
    contact:        ContactInfo {
      email:        "liamvwoudenberg@gmail.com".to_owned(),
      location:     "Utrecht / Randstad, NL".to_owned(),
      placeholders: FormPlaceholders::default(),
    },
    projects:       gallery(),
    packages:       vec![
      package(
        "photo-portrait",
        "Essential Portrait",
        Photography,
        "€350",
        "Sharp, professional headshots and lifestyle portraits on location.",
        &["2 Hour Session", "Natural Light or Flash", "15 Retouched Images", "Utrecht Location"],
        false,
      ),
      package(
        "photo-event",
        "Event Coverage",
        Photography,
        "€750",
        "Documentary-style coverage for corporate events, launches, or parties.",
        &["Half Day (4 Hours)", "50+ Edited High-Res Images", "Fast 48h Delivery", "Online Gallery"],
        false,
      ),
      package(
        "video-social",
        "Social Reels",
        Videography,
        "€595",
        "Vertical video content designed to stop the scroll.",
        &["Half Day Shoot", "3x Edited Reels (9:16)", "Cinema Rig + Color Grade", "Royalty-Free Music"],
        false,
      ),
      package(
        "video-brand",
        "Brand Film",
        Videography,
        "€1.495",
        "A cinematic 60-90s film that tells your brand story.",
        &[
          "Full Day Production",
          "Approx 60-90 Seconds",
          "Pro Cinema Rig + Lighting",
          "Pro Audio & Sound Mix",
          "Advanced Color Grading",
        ],
        true,
      ),
      package(
        "combo-creator",
        "The Full Stack",
        Combo,
        "€1.895",
        "A complete content refresh, switching between photo and video throughout the day.",
        &[
          "Full Day Hybrid Shoot",
          "1x Brand Film (No Pro Audio)",
          "30+ Pro Photos",
          "3x Social Snippets",
          "Color Grading Included",
        ],
        false,
      ),
    ],
    labels:         labels(&[
      ("nav.home", "Home"),
      ("nav.work", "Work"),
      ("nav.services", "Services"),
      ("nav.contact", "Contact"),
      ("filter.all", "All Work"),
      ("filter.photography", "Photography"),
      ("filter.cinematography", "Cinematography"),
      ("contact.submit", "Send Inquiry"),
    ]),
  }
}

/// The built-in Dutch document. Gallery titles are proper names and stay as
/// they are; descriptive copy is translated.
pub fn default_document_nl() -> SiteDocument {
  let mut doc = default_document();
  doc.branding.description = "Een onafhankelijke creatieve studio in Utrecht, voor klanten in de hele Randstad.".to_owned();
  doc.hero.subtitle = "Onafhankelijk Director of Photography & fotograaf. Hoogwaardige visuele verhalen voor merken in de Randstad en daarbuiten.".to_owned();
  doc.contact.placeholders = FormPlaceholders {
    name:    Some("Je naam".to_owned()),
    email:   Some("Je e-mailadres".to_owned()),
    dates:   Some("Gewenste data".to_owned()),
    message: Some("Vertel over je project".to_owned()),
  };
  for package in &mut doc.packages {
    package.description = match package.id.as_str() {
      "photo-portrait" => "Scherpe, professionele portretten op locatie.",
      "photo-event" => "Documentaire verslaglegging van zakelijke evenementen en feesten.",
      "video-social" => "Verticale video die opvalt in de feed.",
      "video-brand" => "Een filmische merkfilm van 60-90 seconden.",
      "combo-creator" => "Foto en video op één dag voor een complete contentbibliotheek.",
      _ => continue,
    }
    .to_owned();
  }
  doc.labels = labels(&[
    ("nav.home", "Home"),
    ("nav.work", "Werk"),
    ("nav.services", "Diensten"),
    ("nav.contact", "Contact"),
    ("filter.all", "Al het werk"),
    ("filter.photography", "Fotografie"),
    ("filter.cinematography", "Film"),
    ("contact.submit", "Verstuur aanvraag"),
  ]);
  doc
}

/// Built-in documents for every language shipped with the site.
pub fn builtin_documents() -> BTreeMap<Language, SiteDocument> {
  BTreeMap::from([
    (Language::english(), default_document()),
    (Language::dutch(), default_document_nl()),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtins_have_unique_ids() {
    for doc in builtin_documents().values() {
      doc.check_unique_ids().unwrap();
    }
  }

  #[test]
  fn translations_share_gallery_and_package_ids() {
    let en = default_document();
    let nl = default_document_nl();
    assert_eq!(en.gallery_ids(), nl.gallery_ids());
    assert_ne!(en.labels, nl.labels);
    assert!(nl.packages.iter().zip(&en.packages).all(|(a, b)| a.id == b.id));
  }

  #[test]
  fn one_recommended_videography_package() {
    let doc = default_document();
    let recommended: Vec<_> =
      doc.packages.iter().filter(|p| p.recommended).collect();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0].category, PackageCategory::Videography);
  }
}
