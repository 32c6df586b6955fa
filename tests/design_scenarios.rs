use gritchamber_lib::report::formula_breakdown::formula_steps;
use gritchamber_lib::{
    calculate, calculate_aerated, calculate_horizontal, calculate_vertical, AeratedParams,
    CalculationResult, ChamberType, DesignInput, HorizontalParams, ParameterSet, VerticalParams,
};

fn input(q: f64, kz: f64, chamber_type: ChamberType) -> DesignInput {
    DesignInput {
        flow_rate: q,
        variation_coefficient: kz,
        chamber_type,
    }
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

fn assert_all_finite_non_negative(result: &CalculationResult) {
    for (name, value) in result.numeric_fields() {
        assert!(value.is_finite() && value >= 0.0, "{} = {}", name, value);
    }
}

#[test]
fn horizontal_manual_example() {
    let result = calculate_horizontal(
        &input(0.2, 1.5, ChamberType::Horizontal),
        &HorizontalParams::default(),
    )
    .unwrap();

    assert_close(result.length, 7.5, 1e-9);
    assert_close(result.details.area, 0.8, 1e-9);
    assert_eq!(result.num_channels, Some(2));
    assert_close(result.total_width, 1.2, 1e-9);
    assert_close(result.volume_grit.unwrap(), 0.691, 1e-9);
    assert_close(result.details.grit_depth.unwrap(), 0.4, 1e-9);
    assert_close(result.total_depth, 1.7, 1e-9);
}

#[test]
fn aerated_manual_example() {
    let result = calculate_aerated(
        &input(1.2, 1.5, ChamberType::Aerated),
        &AeratedParams::default(),
    )
    .unwrap();

    assert_close(result.details.volume.unwrap(), 144.0, 1e-9);
    assert_close(result.details.area, 12.0, 1e-9);
    assert_close(result.length, 12.0, 1e-9);
    assert_close(result.effective_depth, 2.83, 1e-9);
    assert_close(result.total_width, 4.24, 1e-9);
    assert_close(result.air_supply.unwrap(), 864.0, 1e-9);
    assert_close(result.total_depth, 3.63, 1e-9);
}

#[test]
fn vertical_manual_example() {
    let result = calculate_vertical(
        &input(0.2, 1.5, ChamberType::Vertical),
        &VerticalParams::default(),
    )
    .unwrap();

    assert_close(result.details.area, 4.0, 1e-9);
    assert_close(result.diameter.unwrap(), 2.26, 1e-9);
    assert_eq!(result.length, result.diameter.unwrap());
    assert_eq!(result.total_width, result.diameter.unwrap());
    assert_close(result.effective_depth, 1.5, 1e-9);
    assert_close(result.details.cone_height.unwrap(), 1.13, 1e-9);
    assert_close(result.total_depth, 2.93, 1e-9);
}

#[test]
fn valid_inputs_give_finite_non_negative_results() {
    let flows = [0.001, 0.05, 0.2, 1.2, 10.0, 250.0];
    let coefficients = [1.0, 1.3, 1.5, 2.3];
    for chamber_type in ChamberType::ALL {
        let params = ParameterSet::default_for(chamber_type);
        for q in flows {
            for kz in coefficients {
                let result = calculate(&input(q, kz, chamber_type), &params)
                    .unwrap_or_else(|| panic!("{} declined q={} kz={}", chamber_type, q, kz));
                assert_all_finite_non_negative(&result);
            }
        }
    }
}

#[test]
fn hopper_depth_never_below_minimum() {
    let params = HorizontalParams::default();
    for q in [0.0001, 0.01, 0.2, 3.0] {
        for kz in [1.0, 2.5, 100.0] {
            let result =
                calculate_horizontal(&input(q, kz, ChamberType::Horizontal), &params).unwrap();
            assert!(result.details.grit_depth.unwrap() >= 0.4);
        }
    }
}

#[test]
fn declines_bad_flow_and_coefficient_for_every_chamber() {
    let bad = [
        (0.0, 1.5),
        (-0.2, 1.5),
        (0.2, 0.0),
        (0.2, -1.0),
        (f64::NAN, 1.5),
        (0.2, f64::NAN),
        (f64::INFINITY, 1.5),
    ];
    for chamber_type in ChamberType::ALL {
        let params = ParameterSet::default_for(chamber_type);
        for (q, kz) in bad {
            assert!(
                calculate(&input(q, kz, chamber_type), &params).is_none(),
                "{} q={} kz={}",
                chamber_type,
                q,
                kz
            );
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    for chamber_type in ChamberType::ALL {
        let design = input(0.37, 1.42, chamber_type);
        let params = ParameterSet::default_for(chamber_type);
        let first = calculate(&design, &params).unwrap();
        let second = calculate(&design, &params).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            formula_steps(&design, &params, &first),
            formula_steps(&design, &params, &second)
        );
    }
}

#[test]
fn result_serializes_with_camel_case_fields() {
    let result = calculate(
        &input(0.2, 1.5, ChamberType::Horizontal),
        &ParameterSet::default_for(ChamberType::Horizontal),
    )
    .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["chamberType"], "HORIZONTAL");
    assert_eq!(json["totalWidth"], 1.2);
    assert_eq!(json["details"]["velocityCheck"], 0.25);
    assert!(json.get("diameter").is_none());
}
