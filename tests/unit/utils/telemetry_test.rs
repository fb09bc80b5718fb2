// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use phishrs::utils::telemetry;

    #[test]
    fn test_telemetry_initialization() {
        // 初始化遥测系统
        telemetry::init_telemetry();

        tracing::debug!("This is a debug message");
        tracing::info!("This is an info message");
        tracing::warn!("This is a warning message");

        // 测试结构化日志
        tracing::info!(
            model = "Decision Tree",
            verdict = "LEGITIMATE",
            degraded = ?Vec::<String>::new(),
            "Classification completed"
        );
    }
}
