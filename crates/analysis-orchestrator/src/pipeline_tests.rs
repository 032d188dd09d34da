#[cfg(test)]
mod tests {
    use super::super::config::AnalysisConfig;
    use super::super::fixtures::*;
    use super::super::pipeline::*;
    use super::super::schema::SummaryField;
    use analysis_core::*;

    #[test]
    fn test_long_uptrend_brief() {
        // +1.3 / -0.7: RSI 65 on the last 14 changes, SMA50 above SMA200 for 800 bars
        let series = series(&zigzag(1000, 1.3, 0.7));
        let brief = analyze_market(&series, "SPY", &AnalysisConfig::default()).unwrap();

        let timeframes = brief.summary.timeframes.as_ref().unwrap();
        assert_eq!(brief.summary.get(SummaryField::OverallTrend), "Upward");
        assert_eq!(brief.summary.get(SummaryField::Momentum), "Positive");
        assert_eq!(brief.summary.get(SummaryField::TrendDuration), "Extended (4+ months)");
        assert_eq!(timeframes.daily.directional_bias, DirectionalBias::Bullish);
        assert_eq!(timeframes.daily.confidence, Confidence::MediumHigh);
        assert_eq!(timeframes.weekly.directional_bias, DirectionalBias::Bullish);
        assert!(!timeframes.timeframe_conflict.exists);

        assert_eq!(brief.raw_values.rsi, 65.0);
        assert_eq!(brief.raw_values.days_in_trend, 801);
        assert!(brief.summary.notes.contains(&"RSI at 65 suggests positive momentum".to_string()));
        assert!(brief
            .summary
            .notes
            .contains(&"Trend has persisted for 801 days - mature phase".to_string()));

        assert!(brief.validation.is_valid);
        assert_eq!(brief.validation.unknown_count, 0);
        assert_eq!(brief.weekly_indicators.overall_trend, Trend::Upward);
        assert!(brief.scenarios.bullish_scenario.contains("bullish momentum may continue"));
        assert!(brief.data_quality.is_clean());
    }

    #[test]
    fn test_forced_overbought() {
        let series = series(&zigzag(300, 1.5, 0.5));
        let brief = analyze_market(&series, "QQQ", &AnalysisConfig::default()).unwrap();

        assert_eq!(brief.raw_values.rsi, 75.0);
        assert_eq!(brief.summary.get(SummaryField::Momentum), "Overbought");
        assert_eq!(brief.summary.notes[0], "RSI at 75 indicates overbought conditions");
    }

    #[test]
    fn test_exactly_fifty_bars() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.1).collect();
        let brief = analyze_market(&series(&closes), "IWM", &AnalysisConfig::default()).unwrap();

        assert_eq!(brief.summary.get(SummaryField::OverallTrend), "Unknown");
        // Unknown before defaults, Moderate after
        assert_eq!(brief.summary.get(SummaryField::TrendStrength), "Moderate");
        assert_eq!(brief.validation.unknown_count, 1);
        assert!((brief.validation.unknown_percentage - 100.0 / 13.0).abs() < 1e-9);
        assert!(brief.validation.is_valid);

        let timeframes = brief.summary.timeframes.as_ref().unwrap();
        assert_eq!(timeframes.daily.directional_bias, DirectionalBias::Neutral);
        assert_eq!(timeframes.daily.confidence, Confidence::Low);
    }

    #[test]
    fn test_below_floor_rejected() {
        let err = analyze_market(&series(&[100.0; 49]), "DIA", &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { required: 50, actual: 49 });
    }

    #[test]
    fn test_strict_gate_rejects() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.1).collect();
        let config = AnalysisConfig {
            max_unknown_fraction: 0.05,
            ..Default::default()
        };
        let err = analyze_market(&series(&closes), "IWM", &config).unwrap_err();
        assert_eq!(err, AnalysisError::ValidationFailure { unknown_count: 1, total: 13 });
    }

    #[test]
    fn test_loose_config_cannot_lower_floor() {
        let config = AnalysisConfig {
            min_daily_bars: 10,
            max_unknown_fraction: 1.0,
            ..Default::default()
        };
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let err = analyze_market(&series(&closes), "SPY", &config).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { required: 50, actual: 10 });
    }

    #[test]
    fn test_weekly_series_refused() {
        let weekly = PriceSeries::weekly(bars_from_closes(&[100.0; 60])).unwrap();
        assert!(matches!(
            analyze_market(&weekly, "SPY", &AnalysisConfig::default()),
            Err(AnalysisError::InvalidData(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let series = series(&zigzag(400, 1.1, 0.9));
        let config = AnalysisConfig::default();
        let first = analyze_market(&series, "SPY", &config).unwrap();
        let second = analyze_market(&series, "SPY", &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_flattens_summary() {
        let brief = analyze_market(&series(&zigzag(300, 1.5, 0.5)), "QQQ", &AnalysisConfig::default())
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&brief.payload().to_json().unwrap()).unwrap();

        assert!(json["marketData"]["overallTrend"].is_string());
        assert!(json["indicatorSignals"].is_object());
        assert!(json["context"].is_object());
        assert!(json["notes"].is_array());
        assert!(json["timeframes"]["timeframeConflict"]["exists"].is_boolean());
        assert!(json["scenarios"]["invalidationTriggers"].is_array());
        assert!(json.get("validation").is_none());
    }
}
