//! Prompt builders for the grader and the tutor.

use lab_core::{SimulationState, WorksheetAnswers};

pub const REACTION_EQUATION: &str = "Zn(s) + CuSO4(aq) -> ZnSO4(aq) + Cu(s)";

/// Grading prompt for the digital lab report. Answers are embedded as
/// pretty-printed JSON keyed by field id.
pub fn grading_prompt(answers: &WorksheetAnswers) -> String {
    let answers_json = serde_json::to_string_pretty(answers).unwrap_or_default();
    format!(
        "You are a Chemistry Lab Teaching Assistant evaluating a student's Digital Lab Report \
for the \"Metal Displacement: Zinc + Copper(II) Sulfate\" experiment.

The Reaction: {REACTION_EQUATION}

Student's Input Data:
{answers_json}

Task:
Review the student's answers.
1. Check if their observations (Color changes: Blue -> Pale/Clear; Metal: Grey -> Red/Brown coating; \
Temp: Increases) are consistent with the chemistry.
2. Check if their analysis of redox (Electron transfer, half-equations) is correct.
3. Provide constructive feedback. Point out specific errors but be encouraging.
4. If they haven't filled out a field, kindly prompt them to observe the simulation.

Format your response as a concise markdown list of feedback points. Start with a brief overall \
grade/assessment (e.g., \"Great job!\", \"Needs review\").
"
    )
}

/// Tutor prompt carrying the live simulation readings.
pub fn tutor_prompt(question: &str, state: &SimulationState) -> String {
    format!(
        "You are a helpful Chemistry Tutor during a lab simulation.
Current Simulation State: Temp: {temp:.1}°C, Time: {time}s.

The student asks: \"{question}\"

Provide a short, clear explanation suitable for a high school chemistry student. \
Focus on the displacement reaction between Zinc and Copper Sulfate.
",
        temp = state.temperature,
        time = state.elapsed_time,
        question = question.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::WorksheetField;

    #[test]
    fn grading_prompt_embeds_reaction_and_answers() {
        let mut answers = WorksheetAnswers::new();
        answers.set(WorksheetField::AnalysisQ6, "Zn + Cu2+ -> Zn2+ + Cu");
        let prompt = grading_prompt(&answers);
        assert!(prompt.contains(REACTION_EQUATION));
        assert!(prompt.contains("\"analysisQ6\": \"Zn + Cu2+ -> Zn2+ + Cu\""));
        assert!(prompt.contains("\"extensionQ2\": \"\""));
        assert!(prompt.contains("Blue -> Pale/Clear"));
    }

    #[test]
    fn tutor_prompt_embeds_state_readings() {
        let state = SimulationState {
            is_running: true,
            is_complete: false,
            elapsed_time: 10,
            temperature: 20.696,
        };
        let prompt = tutor_prompt("  Why is it fading?  ", &state);
        assert!(prompt.contains("Temp: 20.7°C, Time: 10s."));
        assert!(prompt.contains("The student asks: \"Why is it fading?\""));
    }
}
