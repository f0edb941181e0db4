//! services/api/src/adapters/catalog.rs
//!
//! This module contains the catalog adapter, the concrete implementation of
//! the `CatalogService` port. The catalog is a fixed, in-memory data set; the
//! demo ships with a curated sample of Indian intangible heritage records.

use async_trait::async_trait;
use virasat_core::domain::{Category, HeritageItem, MediaType};
use virasat_core::ports::{CatalogFilter, CatalogService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A catalog adapter backed by a static item list.
#[derive(Clone)]
pub struct StaticCatalogAdapter {
    items: Vec<HeritageItem>,
    categories: Vec<Category>,
}

impl StaticCatalogAdapter {
    /// Creates the adapter with the built-in sample catalog.
    pub fn new() -> Self {
        Self::with_items(sample_items())
    }

    /// Creates the adapter over an explicit item list. Category counts are
    /// derived from the items so the two can never disagree.
    pub fn with_items(items: Vec<HeritageItem>) -> Self {
        let categories = category_definitions()
            .into_iter()
            .map(|(slug, title, description)| Category {
                item_count: items.iter().filter(|i| i.category == slug).count(),
                slug: slug.to_string(),
                title: title.to_string(),
                description: description.to_string(),
            })
            .collect();
        Self { items, categories }
    }
}

impl Default for StaticCatalogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// `CatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogService for StaticCatalogAdapter {
    /// Lists catalog items matching the filter. The query term matches the
    /// title or any tag, case-insensitively; the remaining filters are exact.
    async fn list_items(&self, filter: &CatalogFilter) -> PortResult<Vec<HeritageItem>> {
        let query = filter.query.as_deref().map(str::to_lowercase);
        let matches = |item: &HeritageItem| {
            let match_query = query.as_deref().is_none_or(|q| {
                item.title.to_lowercase().contains(q)
                    || item.tags.iter().any(|t| t.to_lowercase().contains(q))
            });
            let match_category = filter
                .category
                .as_deref()
                .is_none_or(|c| item.category == c);
            let match_language = filter
                .language
                .as_deref()
                .is_none_or(|l| item.language == l);
            let match_type = filter
                .media_type
                .as_deref()
                .is_none_or(|t| item.media_type.as_str() == t);
            match_query && match_category && match_language && match_type
        };
        Ok(self.items.iter().filter(|i| matches(i)).cloned().collect())
    }

    async fn get_item(&self, item_id: &str) -> PortResult<HeritageItem> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(item_id.to_string()))
    }

    async fn list_categories(&self) -> PortResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

//=========================================================================================
// Sample Data
//=========================================================================================

fn category_definitions() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "oral-traditions",
            "Oral Traditions",
            "Songs, stories, and chants passed down by voice across generations.",
        ),
        (
            "performing-arts",
            "Performing Arts",
            "Music, dance, and theatre traditions performed for the community.",
        ),
        (
            "rituals-festivals",
            "Rituals & Festivals",
            "Ceremonies and festive events that mark the rhythms of communal life.",
        ),
        (
            "traditional-crafts",
            "Traditional Crafts",
            "Handmade textiles, objects, and techniques of skilled artisans.",
        ),
        (
            "folk-arts",
            "Folk Arts",
            "Painting, sculpture, and decorative arts rooted in local practice.",
        ),
        (
            "languages-scripts",
            "Languages & Scripts",
            "Endangered languages, dialects, and writing systems.",
        ),
    ]
}

fn sample_items() -> Vec<HeritageItem> {
    vec![
        HeritageItem {
            id: "baul-songs".to_string(),
            title: "Baul Songs of Kushtia District".to_string(),
            description: "Mystical songs of the wandering Baul minstrels of Bengal, blending \
                          Vaishnav, Sufi, and Buddhist thought in search of the divine within."
                .to_string(),
            category: "oral-traditions".to_string(),
            region: "West Bengal, India".to_string(),
            language: "Bengali".to_string(),
            media_type: MediaType::Audio,
            tags: vec![
                "Baul".to_string(),
                "Folk Song".to_string(),
                "Mysticism".to_string(),
                "Lalon".to_string(),
            ],
            thumbnail: "/thumbnails/baul-songs.jpg".to_string(),
            contributor: "Anjali Sen".to_string(),
            date: "2024-01-12".to_string(),
        },
        HeritageItem {
            id: "phad-narration".to_string(),
            title: "Pabuji Ki Phad Scroll Narration".to_string(),
            description: "Night-long narration of the epic of Pabuji, performed by Bhopa priest \
                          singers in front of a painted phad scroll."
                .to_string(),
            category: "performing-arts".to_string(),
            region: "Rajasthan, India".to_string(),
            language: "Marwari".to_string(),
            media_type: MediaType::Video,
            tags: vec![
                "Phad".to_string(),
                "Epic".to_string(),
                "Bhopa".to_string(),
                "Scroll Painting".to_string(),
            ],
            thumbnail: "/thumbnails/phad-narration.jpg".to_string(),
            contributor: "Mohan Bhopa".to_string(),
            date: "2024-02-03".to_string(),
        },
        HeritageItem {
            id: "theyyam-ritual".to_string(),
            title: "Theyyam Ritual Performance".to_string(),
            description: "Ritual dance worship of North Malabar in which the performer embodies \
                          the deity, combining elaborate costume, make-up, and trance."
                .to_string(),
            category: "rituals-festivals".to_string(),
            region: "Kerala, India".to_string(),
            language: "Malayalam".to_string(),
            media_type: MediaType::Video,
            tags: vec![
                "Theyyam".to_string(),
                "Ritual Dance".to_string(),
                "Malabar".to_string(),
            ],
            thumbnail: "/thumbnails/theyyam-ritual.jpg".to_string(),
            contributor: "K. V. Raman".to_string(),
            date: "2024-02-18".to_string(),
        },
        HeritageItem {
            id: "bhuta-kola".to_string(),
            title: "Bhuta Kola Spirit Chants".to_string(),
            description: "Invocation chants from the coastal Karnataka spirit-worship tradition, \
                          recorded during a night ceremony at a village shrine."
                .to_string(),
            category: "oral-traditions".to_string(),
            region: "Karnataka, India".to_string(),
            language: "Tulu".to_string(),
            media_type: MediaType::Audio,
            tags: vec![
                "Bhuta Kola".to_string(),
                "Spirit Worship".to_string(),
                "Tulu Nadu".to_string(),
            ],
            thumbnail: "/thumbnails/bhuta-kola.jpg".to_string(),
            contributor: "Dinesh Shetty".to_string(),
            date: "2024-03-05".to_string(),
        },
        HeritageItem {
            id: "phulkari-embroidery".to_string(),
            title: "Phulkari Embroidery Patterns".to_string(),
            description: "Flower-work embroidery of Punjab, stitched by women for weddings and \
                          festivals, with motifs handed down within families."
                .to_string(),
            category: "traditional-crafts".to_string(),
            region: "Punjab, India".to_string(),
            language: "Punjabi".to_string(),
            media_type: MediaType::Image,
            tags: vec![
                "Phulkari".to_string(),
                "Embroidery".to_string(),
                "Textile".to_string(),
            ],
            thumbnail: "/thumbnails/phulkari-embroidery.jpg".to_string(),
            contributor: "Harpreet Kaur".to_string(),
            date: "2024-03-21".to_string(),
        },
        HeritageItem {
            id: "powada-ballads".to_string(),
            title: "Powada Ballads of Maharashtra".to_string(),
            description: "Heroic ballads sung by Shahirs celebrating historical figures, \
                          performed with the daf drum in a rousing declamatory style."
                .to_string(),
            category: "performing-arts".to_string(),
            region: "Maharashtra, India".to_string(),
            language: "Marathi".to_string(),
            media_type: MediaType::Audio,
            tags: vec![
                "Powada".to_string(),
                "Ballad".to_string(),
                "Shahir".to_string(),
            ],
            thumbnail: "/thumbnails/powada-ballads.jpg".to_string(),
            contributor: "Vikram Jadhav".to_string(),
            date: "2024-04-02".to_string(),
        },
        HeritageItem {
            id: "kalighat-pat".to_string(),
            title: "Kalighat Pat Painting Collection".to_string(),
            description: "Nineteenth-century watercolour pats from the Kalighat temple bazaar, \
                          depicting deities and sharp-eyed satire of Calcutta life."
                .to_string(),
            category: "folk-arts".to_string(),
            region: "West Bengal, India".to_string(),
            language: "Bengali".to_string(),
            media_type: MediaType::Image,
            tags: vec![
                "Kalighat Painting".to_string(),
                "Pat".to_string(),
                "Watercolour".to_string(),
            ],
            thumbnail: "/thumbnails/kalighat-pat.jpg".to_string(),
            contributor: "Rekha Pal".to_string(),
            date: "2024-04-19".to_string(),
        },
        HeritageItem {
            id: "landa-script".to_string(),
            title: "Landa Merchant Script Ledgers".to_string(),
            description: "Pages from trading ledgers written in the endangered Landa mercantile \
                          script once used across Punjab and Sindh."
                .to_string(),
            category: "languages-scripts".to_string(),
            region: "Punjab, India".to_string(),
            language: "Punjabi".to_string(),
            media_type: MediaType::Text,
            tags: vec![
                "Landa".to_string(),
                "Script".to_string(),
                "Manuscript".to_string(),
            ],
            thumbnail: "/thumbnails/landa-script.jpg".to_string(),
            contributor: "Gurdeep Singh".to_string(),
            date: "2024-05-07".to_string(),
        },
    ]
}

//=========================================================================================
// Tests
//=========================================================================================
