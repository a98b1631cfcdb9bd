// ==========================================
// RecoveryMatcher 集成测试
// ==========================================
// 覆盖: 分级优先顺序、组合结果守恒、无匹配返回 None
// ==========================================

mod helpers;

use factory_floor_planner::engine::{MatchStage, RecoveryMatcher, RecoveryMatcherConfig};
use helpers::test_data_builder::rule;

const EPS: f64 = 1e-9;

#[test]
fn test_exact_thickness_always_returns_that_rule() {
    let rules = vec![
        rule(2.0, "Pad"),
        rule(4.0, "Topper"),
        rule(3.8, "Quasi"),
        rule(6.0, "Cuscino"),
    ];
    let matcher = RecoveryMatcher::default();

    for target in &rules {
        let m = matcher.match_remainder(target.thickness_cm, &rules).unwrap();
        assert_eq!(m.rule, *target);
        assert!(!m.is_combination);
        assert_eq!(m.count, 1);
        assert_eq!(m.leftover_cm, 0.0);
    }
}

#[test]
fn test_remainder_below_every_rule_returns_none() {
    let rules = vec![rule(3.0, "Pad"), rule(5.0, "Topper")];
    let matcher = RecoveryMatcher::default();

    for remainder in [0.1, 1.0, 2.0, 2.49] {
        assert!(matcher.match_remainder(remainder, &rules).is_none(), "{}", remainder);
    }
}

#[test]
fn test_combination_results_conserve_thickness() {
    let rules = vec![rule(1.5, "Pad"), rule(4.0, "Topper"), rule(7.0, "Cuscino")];
    let matcher = RecoveryMatcher::default();

    let mut remainder = 0.1;
    while remainder < 40.0 {
        if let Some(m) = matcher.match_remainder(remainder, &rules) {
            if m.is_combination {
                assert!(m.count >= 1);
                assert!(m.leftover_cm >= 0.0);
                let total = m.count as f64 * m.rule.thickness_cm + m.leftover_cm;
                assert!((total - remainder).abs() < 1e-6, "remainder={}", remainder);
            }
        }
        remainder += 0.37;
    }
}

#[test]
fn test_example_topper_pad_exact_combination() {
    let rules = vec![rule(4.0, "Topper"), rule(2.0, "Pad")];

    let (stage, m) = RecoveryMatcher::default()
        .match_with_stage(8.0, &rules)
        .unwrap();
    assert_eq!(stage, MatchStage::ExactCombination);
    assert_eq!(m.rule.thickness_cm, 4.0);
    assert!(m.is_combination);
    assert_eq!(m.count, 2);
    assert!(m.leftover_cm.abs() < EPS);
}

#[test]
fn test_example_fallback_combination() {
    let rules = vec![rule(3.0, "X")];

    let (stage, m) = RecoveryMatcher::default()
        .match_with_stage(10.0, &rules)
        .unwrap();
    assert_eq!(stage, MatchStage::FallbackCombination);
    assert_eq!(m.count, 3);
    assert!((m.leftover_cm - 1.0).abs() < EPS);
}

#[test]
fn test_example_close_match() {
    let rules = vec![rule(1.5, "Pad")];

    let (stage, m) = RecoveryMatcher::default()
        .match_with_stage(1.4, &rules)
        .unwrap();
    assert_eq!(stage, MatchStage::Close);
    assert!(!m.is_combination);
    assert_eq!(m.rule.thickness_cm, 1.5);
}

#[test]
fn test_close_match_beats_combination() {
    // 6.3 可组合 3 x 2cm，但 6.0 在容差内优先
    let rules = vec![rule(2.0, "Pad"), rule(6.0, "Cuscino")];

    let (stage, m) = RecoveryMatcher::default()
        .match_with_stage(6.3, &rules)
        .unwrap();
    assert_eq!(stage, MatchStage::Close);
    assert_eq!(m.rule.product_type, "Cuscino");
}

#[test]
fn test_combination_prefers_thicker_rule_in_catalog_tie() {
    // 同厚度规则保持目录顺序
    let rules = vec![rule(2.0, "Primo"), rule(2.0, "Secondo")];

    let m = RecoveryMatcher::default().match_remainder(4.2, &rules).unwrap();
    assert_eq!(m.rule.product_type, "Primo");
    assert_eq!(m.count, 2);
}

#[test]
fn test_custom_leftover_limit_changes_stage() {
    let rules = vec![rule(3.0, "X")];
    let matcher = RecoveryMatcher::new(RecoveryMatcherConfig {
        close_tolerance_cm: 0.5,
        combination_leftover_limit_cm: 1.5,
    });

    let (stage, _) = matcher.match_with_stage(10.0, &rules).unwrap();
    assert_eq!(stage, MatchStage::ExactCombination);
}
