// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use phishrs::config::settings::Settings;

    #[test]
    fn test_config_loading_from_default_toml() {
        let settings = Settings::new().expect("configuration should load");

        assert!(!settings.models.directory.is_empty());
        assert!(settings.fetcher.max_redirects > 0);

        let fetch = settings.fetch_config();
        assert!(fetch.page_timeout <= fetch.request_timeout);
        assert!(fetch.dns_timeout <= fetch.request_timeout);
        assert!(fetch.rank_timeout <= fetch.request_timeout);
    }
}
