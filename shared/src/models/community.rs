//! Expert community board

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter selector value meaning "no restriction"
pub const ALL: &str = "All";

/// Crop tag for posts that apply to every crop
pub const ALL_CROPS: &str = "All Crops";

/// Regions always offered by the board, before any found in posts
pub const DEFAULT_REGIONS: [&str; 4] = ["Tamil Nadu", "Karnataka", "Maharashtra", "Punjab"];

/// Crops always offered by the board, before any found in posts
pub const DEFAULT_CROPS: [&str; 4] = [ALL_CROPS, "Tomato", "Rice", "Potato"];

/// Author name stamped on posts published through the board
pub const EXPERT_AUTHOR: &str = "Expert";

/// A verified post on the community board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub region: String,
    pub crop: String,
    pub date: DateTime<Utc>,
    pub verified: bool,
}

/// Draft submitted by an expert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCommunityPost {
    pub title: String,
    pub content: String,
    pub region: String,
    pub crop: String,
}

impl CommunityPost {
    /// Publish a draft as a verified expert post dated now
    pub fn publish(draft: NewCommunityPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            author: EXPERT_AUTHOR.to_string(),
            region: draft.region,
            crop: draft.crop,
            date: Utc::now(),
            verified: true,
        }
    }

    /// Whether the post passes the region and crop selectors
    pub fn matches(&self, selected_region: &str, selected_crop: &str) -> bool {
        let region_match = selected_region == ALL || self.region == selected_region;
        let crop_match =
            selected_crop == ALL || self.crop == selected_crop || self.crop == ALL_CROPS;
        region_match && crop_match
    }
}

/// Filter posts by region and crop, keeping their relative order
pub fn filter_posts<'a>(
    posts: &'a [CommunityPost],
    selected_region: &str,
    selected_crop: &str,
) -> Vec<&'a CommunityPost> {
    posts
        .iter()
        .filter(|post| post.matches(selected_region, selected_crop))
        .collect()
}

/// Region choices: the defaults, then any other region seen in posts
pub fn region_options(posts: &[CommunityPost]) -> Vec<String> {
    unique_in_order(
        DEFAULT_REGIONS
            .iter()
            .copied()
            .chain(posts.iter().map(|p| p.region.as_str())),
    )
}

/// Crop filter choices: "All", the defaults, then any other crop seen in posts
pub fn crop_options(posts: &[CommunityPost]) -> Vec<String> {
    unique_in_order(
        std::iter::once(ALL)
            .chain(DEFAULT_CROPS.iter().copied())
            .chain(posts.iter().map(|p| p.crop.as_str())),
    )
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Posts every new session starts with, newest first
pub fn seed_posts() -> Vec<CommunityPost> {
    let seed = [
        (
            "Effective Management of Late Blight in Tomatoes",
            "Farmers in coastal regions should apply Bordeaux mixture (1%) as a preventive \
             measure during monsoon. Ensure proper spacing between plants for air circulation. \
             Remove and destroy infected plant parts immediately.",
            "Dr. Rajesh Kumar",
            "Tamil Nadu",
            "Tomato",
            (2025, 10, 8),
        ),
        (
            "Bacterial Blight Control in Paddy Fields",
            "Use certified seeds and avoid excessive nitrogen application. Maintain 2-3 cm \
             water level in fields. Apply Plantomycin during active tillering stage. Variety \
             ADT-45 shows good resistance.",
            "Dr. Priya Sharma",
            "Tamil Nadu",
            "Rice",
            (2025, 10, 6),
        ),
        (
            "Winter Season Potato Disease Management",
            "Early blight is common in February-March. Start preventive sprays with Mancozeb \
             15 days after planting. Use certified seed tubers and practice crop rotation with \
             legumes.",
            "Agri. Officer Suresh Patel",
            "Punjab",
            "Potato",
            (2025, 10, 5),
        ),
        (
            "Organic Pest Management Tips",
            "Neem oil spray (5ml per liter) is effective against many fungal diseases. Apply in \
             early morning or evening. Combine with yellow sticky traps for insect control. \
             Maintain soil health with compost.",
            "Dr. Meena Iyer",
            "Karnataka",
            ALL_CROPS,
            (2025, 10, 3),
        ),
        (
            "Post-Monsoon Disease Prevention",
            "After heavy rains, ensure proper field drainage. Avoid working in wet fields to \
             prevent disease spread. Apply fungicides only when foliage is dry. Monitor crops \
             daily for early symptoms.",
            "KVK Expert - Dr. Anil Verma",
            "Maharashtra",
            ALL_CROPS,
            (2025, 10, 1),
        ),
    ];

    seed.into_iter()
        .enumerate()
        .map(|(i, (title, content, author, region, crop, (y, m, d)))| CommunityPost {
            id: Uuid::from_u128(i as u128 + 1),
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            region: region.to_string(),
            crop: crop.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .unwrap_or_default(),
            verified: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_posts() {
        let posts = seed_posts();
        assert_eq!(posts.len(), 5);
        assert!(posts.iter().all(|p| p.verified));
        assert!(posts.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_publish_trims_and_verifies() {
        let post = CommunityPost::publish(NewCommunityPost {
            title: "  Stem borer alert ".to_string(),
            content: " Install pheromone traps.\n".to_string(),
            region: "Punjab".to_string(),
            crop: "Rice".to_string(),
        });

        assert_eq!(post.title, "Stem borer alert");
        assert_eq!(post.content, "Install pheromone traps.");
        assert_eq!(post.author, EXPERT_AUTHOR);
        assert!(post.verified);
    }

    #[test]
    fn test_region_options() {
        let mut posts = seed_posts();
        posts[0].region = "Kerala".to_string();
        assert_eq!(
            region_options(&posts),
            ["Tamil Nadu", "Karnataka", "Maharashtra", "Punjab", "Kerala"]
        );
    }

    #[test]
    fn test_crop_options() {
        let mut posts = seed_posts();
        posts[1].crop = "Cotton".to_string();
        assert_eq!(
            crop_options(&posts),
            ["All", "All Crops", "Tomato", "Rice", "Potato", "Cotton"]
        );
    }
}
