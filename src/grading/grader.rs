//! Grading orchestration
//!
//! The grader is the error boundary of the crate: whatever goes wrong while
//! checking a submission ends up in the [`GradeReport`] and in the printed
//! transcript, never as a panic or an `Err` for the caller.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::answer::Answer;
use crate::error::{DeviceMismatch, GradeError};
use crate::exercise::Exercise;
use crate::output::{Output, Tolerance};
use super::device_check::verify_device;
use super::output_check::verify_output;

/// What a device mismatch does to the verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePolicy {
    /// Report the mismatch and keep grading the output
    #[default]
    Advisory,
    /// Fail the submission on any device mismatch
    Strict,
}

/// Grader settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Tolerance used for output comparison
    pub tolerance: Tolerance,
    /// Whether device mismatches gate the verdict
    pub device_policy: DevicePolicy,
}

impl GraderConfig {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_device_policy(mut self, device_policy: DevicePolicy) -> Self {
        self.device_policy = device_policy;
        self
    }
}

/// One or more answers submitted for an exercise
#[derive(Debug, Clone, Copy)]
pub enum Submission<'a> {
    Single(&'a Answer),
    Many(&'a [Answer]),
}

impl<'a> Submission<'a> {
    /// The submitted answers in order
    pub fn answers(&self) -> &'a [Answer] {
        match *self {
            Submission::Single(answer) => std::slice::from_ref(answer),
            Submission::Many(answers) => answers,
        }
    }
}

impl<'a> From<&'a Answer> for Submission<'a> {
    fn from(answer: &'a Answer) -> Self {
        Submission::Single(answer)
    }
}

impl<'a> From<&'a [Answer]> for Submission<'a> {
    fn from(answers: &'a [Answer]) -> Self {
        Submission::Many(answers)
    }
}

impl<'a> From<&'a Vec<Answer>> for Submission<'a> {
    fn from(answers: &'a Vec<Answer>) -> Self {
        Submission::Many(answers.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [Answer; N]> for Submission<'a> {
    fn from(answers: &'a [Answer; N]) -> Self {
        Submission::Many(answers.as_slice())
    }
}

/// A device defect found on one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFinding {
    /// Position of the answer in the submission
    pub answer_index: usize,
    pub mismatch: DeviceMismatch,
}

/// Final outcome of grading a submission
#[derive(Debug)]
pub enum Verdict {
    Correct,
    Incorrect { reason: GradeError },
}

/// Everything observed while grading one submission
#[derive(Debug)]
pub struct GradeReport {
    pub exercise: String,
    pub device_findings: Vec<DeviceFinding>,
    /// Stacked answer outputs, if they could be stacked
    pub output: Option<Output>,
    pub verdict: Verdict,
    /// Lines printed for the learner, in order
    pub transcript: Vec<String>,
}

impl GradeReport {
    pub fn is_correct(&self) -> bool {
        matches!(self.verdict, Verdict::Correct)
    }

    pub fn has_device_findings(&self) -> bool {
        !self.device_findings.is_empty()
    }

    /// Failure reason, if the submission was rejected
    pub fn reason(&self) -> Option<&GradeError> {
        match &self.verdict {
            Verdict::Correct => None,
            Verdict::Incorrect { reason } => Some(reason),
        }
    }
}

/// Grades submissions against exercises
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: GraderConfig,
}

impl Grader {
    pub fn new(config: GraderConfig) -> Self {
        Grader { config }
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    /// Grade a submission without printing anything
    pub fn grade<'a>(&self, exercise: &Exercise, submission: impl Into<Submission<'a>>) -> GradeReport {
        let submission = submission.into();
        let answers = submission.answers();
        let mut transcript = vec![format!("Checking exercise: {}", exercise.name())];
        debug!(exercise = exercise.name(), answers = answers.len(), "grading submission");

        let mut device_findings = Vec::new();
        for (answer_index, answer) in answers.iter().enumerate() {
            if let Err(mismatch) = verify_device(answer.device(), exercise.expected_device()) {
                warn!(exercise = exercise.name(), answer_index, %mismatch, "device mismatch");
                transcript.push(GradeError::DeviceMismatch(mismatch.clone()).to_string());
                device_findings.push(DeviceFinding { answer_index, mismatch });
            }
        }

        if self.config.device_policy == DevicePolicy::Strict {
            if let Some(mismatch) = device_findings.first().map(|f| f.mismatch.clone()) {
                info!(exercise = exercise.name(), "submission rejected on device check");
                return GradeReport {
                    exercise: exercise.name().to_string(),
                    output: None,
                    verdict: Verdict::Incorrect {
                        reason: GradeError::DeviceMismatch(mismatch),
                    },
                    device_findings,
                    transcript,
                };
            }
        }

        let outputs: Vec<Output> = answers.iter().map(|a| a.output().clone()).collect();
        let (stacked, result) = match Output::stack(&outputs) {
            Ok(output) => {
                let result = verify_output(&output, exercise.expected_output(), &self.config.tolerance);
                (Some(output), result)
            }
            Err(e) => (None, Err(e)),
        };
        let actual_text = match &stacked {
            Some(output) => output.to_string(),
            None => render_list(&outputs),
        };

        let verdict = match result {
            Ok(()) => {
                transcript.push("Correct".to_string());
                Verdict::Correct
            }
            Err(reason) => {
                if !matches!(reason, GradeError::OutputMismatch) {
                    warn!(error = %reason, "output comparison failed");
                    transcript.push(format!("Error during execution: {}", reason));
                }
                transcript.push(format!("{} {}", actual_text, exercise.expected_output()));
                transcript.push(GradeError::OutputMismatch.to_string());
                Verdict::Incorrect { reason }
            }
        };

        info!(
            exercise = exercise.name(),
            correct = matches!(verdict, Verdict::Correct),
            device_findings = device_findings.len(),
            "graded submission"
        );

        GradeReport {
            exercise: exercise.name().to_string(),
            device_findings,
            output: stacked,
            verdict,
            transcript,
        }
    }

    /// Grade a submission and write the transcript to `out`.
    ///
    /// Write failures are logged and otherwise ignored.
    pub fn grade_to<'a, W: Write>(
        &self,
        exercise: &Exercise,
        submission: impl Into<Submission<'a>>,
        out: &mut W,
    ) -> GradeReport {
        let report = self.grade(exercise, submission);
        for line in &report.transcript {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!(error = %e, "failed to write grading transcript");
                break;
            }
        }
        report
    }
}

/// Grade with the default configuration, printing the transcript to stdout
pub fn grade<'a>(exercise: &Exercise, submission: impl Into<Submission<'a>>) -> GradeReport {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    Grader::default().grade_to(exercise, submission, &mut handle)
}

// Outputs that could not be stacked, rendered as a plain list
fn render_list(outputs: &[Output]) -> String {
    let items: Vec<String> = outputs.iter().map(|o| o.to_string()).collect();
    format!("[{}]", items.join(", "))
}
