// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use phishrs::domain::models::feature_vector::{FEATURE_COUNT, FEATURE_NAMES};
    use phishrs::domain::models::fetched_content::{FetchedContent, TrafficRank};
    use phishrs::domain::services::feature_extractor::FeatureExtractor;

    const URLS: [&str; 10] = [
        "http://192.168.1.1/login",
        "https://www.example.com/",
        "example.com/path?q=1",
        "http://user@evil.com@bank.com/",
        "http://bit.ly/abc",
        "https://secure-login.example.co.uk/https-verify",
        "",
        "::::",
        "http://[::1]:8080/",
        "ftp://files.example.org/readme.txt",
    ];

    #[test]
    fn test_vector_length_is_fixed_for_all_inputs() {
        for url in URLS {
            let degraded = FeatureExtractor::extract(url, &FetchedContent::degraded_for(url));
            assert_eq!(degraded.to_vec().len(), FEATURE_COUNT, "url: {:?}", url);

            let fetched = FetchedContent {
                final_url: url.to_string(),
                html: "<html><body><iframe></iframe></body></html>".to_string(),
                redirect_count: 3,
                external_redirect_count: 1,
                dns_resolved: true,
                traffic_rank: TrafficRank::Known(42),
                degraded: Vec::new(),
            };
            let full = FeatureExtractor::extract(url, &fetched);
            assert_eq!(full.to_vec().len(), FEATURE_COUNT, "url: {:?}", url);
            assert!(full.contract_violations().is_empty(), "url: {:?}", url);
        }
    }

    #[test]
    fn test_named_values_follow_published_order() {
        let url = "http://192.168.1.1/login";
        let features = FeatureExtractor::extract(url, &FetchedContent::degraded_for(url));

        let names: Vec<&str> = features.named().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());

        let values: Vec<f32> = features.named().into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, features.to_vec());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        for url in URLS {
            let content = FetchedContent::degraded_for(url);
            let first = FeatureExtractor::extract(url, &content);
            let second = FeatureExtractor::extract(url, &content);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_serialized_vector_keeps_field_names() {
        let url = "http://a@b@c.com";
        let features = FeatureExtractor::extract(url, &FetchedContent::degraded_for(url));
        let json = serde_json::to_value(features).unwrap();

        assert_eq!(json["nb_at"], 2.0);
        assert_eq!(json["dns_record"], 1.0);
        assert_eq!(json.as_object().unwrap().len(), FEATURE_COUNT);
    }
}
