//! Community board filtering tests

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use shared::{
    crop_options, filter_posts, region_options, seed_posts, CommunityPost, ALL, ALL_CROPS,
};

fn post(region: &str, crop: &str) -> CommunityPost {
    CommunityPost {
        id: Uuid::new_v4(),
        title: format!("{} / {}", region, crop),
        content: "content".to_string(),
        author: "Expert".to_string(),
        region: region.to_string(),
        crop: crop.to_string(),
        date: Utc::now(),
        verified: true,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_region_filter_excludes_other_regions() {
        let posts = vec![post("Tamil Nadu", "Tomato"), post("Punjab", ALL_CROPS)];

        let filtered = filter_posts(&posts, "Tamil Nadu", ALL);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, posts[0].id);
    }

    #[test]
    fn test_all_crops_post_matches_any_crop() {
        let posts = vec![post("Punjab", ALL_CROPS), post("Punjab", "Potato")];

        let filtered = filter_posts(&posts, ALL, "Rice");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].crop, ALL_CROPS);

        // Region still has to match on its own
        assert!(filter_posts(&posts, "Karnataka", "Rice").is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let posts = vec![post("Tamil Nadu", "Tomato")];
        assert!(filter_posts(&posts, "tamil nadu", ALL).is_empty());
        assert!(filter_posts(&posts, ALL, "tomato").is_empty());
    }

    #[test]
    fn test_seed_posts_by_crop() {
        let posts = seed_posts();

        let rice: Vec<&str> = filter_posts(&posts, ALL, "Rice")
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(
            rice,
            [
                "Bacterial Blight Control in Paddy Fields",
                "Organic Pest Management Tips",
                "Post-Monsoon Disease Prevention",
            ]
        );
    }

    #[test]
    fn test_seed_posts_are_newest_first() {
        let posts = seed_posts();
        assert!(posts.windows(2).all(|w| w[0].date > w[1].date));
        assert!(posts.iter().all(|p| p.verified));
    }

    #[test]
    fn test_filter_options() {
        let mut posts = seed_posts();
        posts.insert(0, post("Kerala", "Banana"));

        assert_eq!(
            region_options(&posts),
            ["Tamil Nadu", "Karnataka", "Maharashtra", "Punjab", "Kerala"]
        );
        assert_eq!(
            crop_options(&posts),
            [ALL, ALL_CROPS, "Tomato", "Rice", "Potato", "Banana"]
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn region_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("Tamil Nadu"),
            Just("Karnataka"),
            Just("Maharashtra"),
            Just("Punjab"),
        ]
    }

    fn crop_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(ALL_CROPS), Just("Tomato"), Just("Rice"), Just("Potato")]
    }

    fn posts_strategy() -> impl Strategy<Value = Vec<CommunityPost>> {
        prop::collection::vec((region_strategy(), crop_strategy()), 0..20)
            .prop_map(|pairs| pairs.into_iter().map(|(r, c)| post(r, c)).collect())
    }

    fn selector_strategy<S>(values: S) -> impl Strategy<Value = &'static str>
    where
        S: Strategy<Value = &'static str>,
    {
        prop_oneof![Just(ALL), values]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// "All"/"All" keeps every post in order
        #[test]
        fn prop_all_selectors_keep_everything(posts in posts_strategy()) {
            let filtered = filter_posts(&posts, ALL, ALL);
            prop_assert_eq!(filtered.len(), posts.len());
        }

        /// Filtering keeps the input's relative order
        #[test]
        fn prop_filter_is_stable(
            posts in posts_strategy(),
            region in selector_strategy(region_strategy()),
            crop in selector_strategy(crop_strategy()),
        ) {
            let positions: Vec<usize> = filter_posts(&posts, region, crop)
                .iter()
                .map(|p| posts.iter().position(|q| q.id == p.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        /// Every kept post satisfies both predicates; every dropped one fails one
        #[test]
        fn prop_filter_matches_predicates(
            posts in posts_strategy(),
            region in selector_strategy(region_strategy()),
            crop in selector_strategy(crop_strategy()),
        ) {
            let filtered = filter_posts(&posts, region, crop);
            for p in &posts {
                let region_ok = region == ALL || p.region == region;
                let crop_ok = crop == ALL || p.crop == crop || p.crop == ALL_CROPS;
                let kept = filtered.iter().any(|f| f.id == p.id);
                prop_assert_eq!(kept, region_ok && crop_ok);
            }
        }

        /// Filtering the filtered list changes nothing
        #[test]
        fn prop_filter_is_idempotent(
            posts in posts_strategy(),
            region in selector_strategy(region_strategy()),
            crop in selector_strategy(crop_strategy()),
        ) {
            let once: Vec<CommunityPost> =
                filter_posts(&posts, region, crop).into_iter().cloned().collect();
            let twice = filter_posts(&once, region, crop);
            prop_assert_eq!(twice.len(), once.len());
        }
    }
}
