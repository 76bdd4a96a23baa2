use num_complex::Complex64;

use qgrader::answer::Invocation;
use qgrader::exercise::catalog::ids;
use qgrader::grading::Submission;
use qgrader::prelude::*;

/// Build an answer whose circuit returns a fixed output
fn fixed_answer(device: Device, output: impl Into<Output>) -> Answer {
    let output = output.into();
    Answer::new(device, circuit(move |_| Ok(output.clone())), None, None).unwrap()
}

/// Grade into a buffer and return the report with the printed text
fn grade_captured<'a>(grader: &Grader, exercise: &Exercise, submission: impl Into<Submission<'a>>) -> (GradeReport, String) {
    let mut buffer = Vec::new();
    let report = grader.grade_to(exercise, submission, &mut buffer);
    (report, String::from_utf8(buffer).unwrap())
}

fn bell_amplitudes() -> Vec<Complex64> {
    vec![
        Complex64::new(0.70710678, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.70710678, 0.0),
    ]
}

#[test]
fn test_bell_pair_correct() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::BELL_PAIR).unwrap();
    let answer = fixed_answer(Device::new("default.qubit", 2), bell_amplitudes());

    let (report, printed) = grade_captured(&Grader::default(), exercise, &answer);

    assert!(report.is_correct());
    assert!(!report.has_device_findings());
    assert_eq!(printed, "Checking exercise: Bell Pair\nCorrect\n");
    assert!(!printed.contains("incorrect"));
    assert!(!printed.contains("Error"));
}

#[test]
fn test_bell_pair_exact_state_vector() {
    // Simulators return full precision amplitudes
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::BELL_PAIR).unwrap();
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let answer = fixed_answer(Device::new("default.qubit", 2), vec![s, 0.0, 0.0, s]);

    assert!(Grader::default().grade(exercise, &answer).is_correct());
}

#[test]
fn test_bell_pair_wrong_output() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::BELL_PAIR).unwrap();
    let answer = fixed_answer(Device::new("default.qubit", 2), vec![1.0, 0.0, 0.0, 0.0]);

    let (report, printed) = grade_captured(&Grader::default(), exercise, &answer);

    assert!(!report.is_correct());
    assert!(matches!(report.reason(), Some(GradeError::OutputMismatch)));

    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], format!("{} {}", report.output.as_ref().unwrap(), exercise.expected_output()));
    assert!(lines[1].contains("[[1+0i, 0+0i, 0+0i, 0+0i]]"));
    assert!(lines[1].contains("[0.70710678+0i, 0+0i, 0+0i, 0.70710678+0i]"));
    assert_eq!(lines[2], "The output is incorrect");
    assert!(!printed.contains("Correct\n"));
}

#[test]
fn test_device_mismatch_is_advisory() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::BELL_PAIR).unwrap();
    let answer = fixed_answer(Device::new("default.qubit", 3), bell_amplitudes());

    let (report, printed) = grade_captured(&Grader::default(), exercise, &answer);

    assert!(report.is_correct());
    assert_eq!(report.device_findings.len(), 1);
    assert_eq!(
        report.device_findings[0].mismatch,
        DeviceMismatch::WireCountMismatch { expected: 2, actual: 3 }
    );
    assert!(printed.contains("The device is incorrectly defined"));
    assert!(printed.ends_with("Correct\n"));
}

#[test]
fn test_device_mismatch_strict() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::BELL_PAIR).unwrap();
    let answer = fixed_answer(Device::new("lightning.qubit", 2), bell_amplitudes());
    let grader = Grader::new(GraderConfig::default().with_device_policy(DevicePolicy::Strict));

    let (report, printed) = grade_captured(&grader, exercise, &answer);

    assert!(!report.is_correct());
    assert!(report.output.is_none());
    assert!(printed.contains("The device is incorrectly defined"));
    assert!(!printed.contains("Correct"));
}

#[test]
fn test_two_scalar_answers() {
    let exercise = Exercise::new("pair of values", DeviceSpec::new("default.qubit", 1), vec![0.25, -0.75]);
    let device = || Device::new("default.qubit", 1);

    let good = vec![fixed_answer(device(), 0.25), fixed_answer(device(), -0.75)];
    assert!(Grader::default().grade(&exercise, &good).is_correct());

    let swapped = vec![fixed_answer(device(), -0.75), fixed_answer(device(), 0.25)];
    assert!(!Grader::default().grade(&exercise, &swapped).is_correct());

    let one_off = [fixed_answer(device(), 0.25), fixed_answer(device(), -0.7)];
    assert!(!Grader::default().grade(&exercise, &one_off).is_correct());
}

#[test]
fn test_expectation_value_scalar() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::EXPVAL).unwrap();

    let answer = fixed_answer(Device::new("default.qubit", 1), 1e-12);
    assert!(Grader::default().grade(exercise, &answer).is_correct());

    let answer = fixed_answer(Device::new("default.qubit", 1), 1.0);
    assert!(!Grader::default().grade(exercise, &answer).is_correct());
}

#[test]
fn test_echantillonage_with_shots() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::ECHANTILLONAGE).unwrap();
    let expected = [-1.0, 0.08, -0.026, 0.0036, 0.00326];

    // One answer per shot count, each producing a single sample mean
    let answers: Vec<Answer> = expected
        .iter()
        .enumerate()
        .map(|(i, &mean)| {
            let qnode = circuit(move |shots| {
                shots.ok_or_else(|| ExecutionError::failed("shots required"))?;
                Ok(Output::scalar(mean))
            });
            Answer::new(Device::new("default.qubit", 1), qnode, Some(10u32.pow(i as u32 + 1)), None).unwrap()
        })
        .collect();

    let (report, printed) = grade_captured(&Grader::default(), exercise, &answers);
    assert!(report.is_correct(), "{}", printed);
    assert!(printed.starts_with("Checking exercise: Échantillonage"));
    assert_eq!(answers[2].shots(), Some(1000));
}

#[test]
fn test_mottonen_complex_amplitudes() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::PREPARE_WITH_MOTTONEN).unwrap();
    let qnode = parametrized(|params, _| {
        let theta = params.as_slice()[0];
        Ok(Output::from(vec![
            Complex64::new((theta / 2.0).cos(), 0.0),
            Complex64::new(0.0, (theta / 2.0).sin()),
        ]))
    });

    let answer = Answer::new(
        Device::new("default.qubit", 1),
        qnode,
        None,
        Some(vec![std::f64::consts::PI / 3.0].into()),
    )
    .unwrap();

    assert!(Grader::default().grade(exercise, &answer).is_correct());

    // The gate-based preparation has the opposite sign on the |1> amplitude
    let gate = catalog.exercise(ids::PREPARE_WITH_GATE).unwrap();
    assert!(!Grader::default().grade(gate, &answer).is_correct());
}

#[test]
fn test_shots_and_params_answer_is_graded() {
    let exercise = Exercise::new("sampled", DeviceSpec::new("default.qubit", 1), vec![0.5]);
    let qnode = |invocation: &Invocation| match invocation {
        Invocation::ShotsAndParams { params, shots } => {
            Ok(Output::scalar(params.as_slice()[0] * (*shots as f64) / 100.0))
        }
        other => Err(ExecutionError::Signature(other.to_string())),
    };

    let answer = Answer::new(Device::new("default.qubit", 1), qnode, Some(100), Some([0.5].into())).unwrap();
    assert!(Grader::default().grade(&exercise, &answer).is_correct());
}

#[test]
fn test_failing_circuit_is_an_error() {
    let qnode = circuit(|_| Err(ExecutionError::failed("wire 3 does not exist")));
    let result = Answer::new(Device::new("default.qubit", 2), qnode, None, None);

    match result {
        Err(GradeError::Execution(err)) => assert!(err.to_string().contains("wire 3")),
        other => panic!("expected execution error, got {:?}", other),
    }
}

#[test]
fn test_mismatched_shapes_do_not_panic() {
    let catalog = Catalog::builtin();
    let exercise = catalog.exercise(ids::PHI_PLUS).unwrap();
    let answer = fixed_answer(Device::new("default.qubit", 2), vec![0.0, 1.0]);

    let (report, printed) = grade_captured(&Grader::default(), exercise, &answer);
    assert!(matches!(report.reason(), Some(GradeError::ShapeMismatch { .. })));
    assert!(printed.contains("Error during execution:"));
    assert!(printed.ends_with("The output is incorrect\n"));
}
