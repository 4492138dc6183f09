// Relevance analysis prompt. The model output is parsed by `analyzer::parse_analysis`,
// so any change to the key names here must be mirrored in `AnalysisResult`.

const PROMPT_HEADER: &str = r#"Analyze the following resume and job description. Provide a detailed analysis in a strict JSON format.
The JSON object must have these exact keys: "score", "summary", "strengths", "weaknesses", "keywords_matched".

- "score": An integer from 0 to 100 representing the relevance of the resume to the job.
- "summary": A 2-3 sentence professional summary of why the candidate is a good or bad fit.
- "strengths": A JSON array of 3-4 key skills or experiences from the resume that align with the job description.
- "weaknesses": A JSON array of 2-3 key skills or requirements from the job description missing from the resume.
- "keywords_matched": A JSON array of important keywords found in both the resume and the job description."#;

const PROMPT_FOOTER: &str =
    "Provide only the JSON object as a response, with no other text before or after it.";

/// Builds the single prompt sent to the model for one analysis.
///
/// Inputs are inserted verbatim between `---` delimiters. No templating pass runs
/// over the inputs, so braces or placeholders inside a resume are inert.
pub fn build_prompt(resume_text: &str, jd_text: &str) -> String {
    format!(
        "{PROMPT_HEADER}\n\n\
         Resume:\n---\n{resume_text}\n---\n\n\
         Job Description:\n---\n{jd_text}\n---\n\n\
         {PROMPT_FOOTER}"
    )
}
