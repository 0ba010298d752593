//! Prompt templates for the writing loop and its workers

use crate::protocol::termination::{KEEP_EDITING, RETURN_TO_REQUESTER};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    // ==================== Controller ====================

    /// System prompt for the planning phase
    pub fn planner_system() -> &'static str {
        "You are the Controller module for an AI assistant built to write and revise research articles."
    }

    /// User prompt for the planning phase
    ///
    /// `targets` is the rendered target registry, `notes` are context
    /// contributions gathered in the previous round.
    pub fn planner_prompt(
        targets: &str,
        conversation_history: &str,
        outline: &str,
        article: &str,
        notes: &[String],
    ) -> String {
        let mut prompt = format!(
            r#"# Task Description
Decide how best to write or revise the ARTICLE. Consider the ARTICLE OUTLINE, the ARTICLE and the CONVERSATION HISTORY,
then use the available CHAINS to decide what happens next. You do not write any section yourself;
you only decide what to do next and delegate that work to CHAINS.

# Instructions
You may delegate work to one or more CHAINS.
Read the name and description of each chain and decide whether and how to use it.
Only give instructions to relevant chains.
The same chain may be invoked several times with different instructions.
Every instruction must move the article towards completing the task.
If the ARTICLE has fewer than 1500 words, give instructions to expand the relevant sections.
Give each chain invocation a score out of 10 so that the invocations can be prioritized.

## CHAINS (name and description of each chain)
{targets}

## CONVERSATION HISTORY
{conversation_history}

## ARTICLE OUTLINE
{outline}

## ARTICLE
{article}
"#
        );

        if !notes.is_empty() {
            prompt.push_str("\n## RESEARCH NOTES\n");
            for note in notes {
                prompt.push_str(&format!("\n{}\n", note));
            }
        }

        prompt.push_str(
            "\n# Controller Decision, one per line, formatted precisely as: \
             {chain name};{score out of 10};{instructions on a single line}\n",
        );

        prompt
    }

    // ==================== Aggregation ====================

    /// System prompt for merging candidate outlines
    pub fn outline_merge_system() -> &'static str {
        "You are an expert-level AI writing editor. Your role is to aggregate multiple suggestions for an article outline into a single one."
    }

    /// User prompt for merging candidate outlines
    pub fn outline_merge_prompt(
        conversation_history: &str,
        existing_outline: &str,
        candidates: &[&str],
    ) -> String {
        format!(
            r#"# Task Description
Combine one or more article outlines into a single outline written in markdown.

# Instructions
Read the CONVERSATION HISTORY, the EXISTING OUTLINE and the POSSIBLE OUTLINES.
Respond with a single article outline that best combines the POSSIBLE OUTLINES.

## CONVERSATION HISTORY
{conversation_history}

## EXISTING OUTLINE
{existing_outline}

## POSSIBLE OUTLINES
{candidates}

## OUTLINE
"#,
            candidates = Self::numbered(candidates, "Outline"),
        )
    }

    /// System prompt for merging partial articles
    pub fn article_merge_system() -> &'static str {
        "You are an expert-level AI writing editor. Your role is to aggregate multiple partial articles into a single, complete article."
    }

    /// User prompt for merging partial articles
    pub fn article_merge_prompt(
        conversation_history: &str,
        outline: &str,
        existing_article: &str,
        candidates: &[&str],
    ) -> String {
        format!(
            r#"# Task Description
Combine one or more partial articles into a single article written in markdown.

# Instructions
Read the CONVERSATION HISTORY, the ARTICLE OUTLINE, the EXISTING ARTICLE and the PARTIAL ARTICLES.
Respond with a single article that best combines and expands the PARTIAL ARTICLES.
The resulting ARTICLE must include every section and subsection of the ARTICLE OUTLINE.

## CONVERSATION HISTORY
{conversation_history}

## ARTICLE OUTLINE
{outline}

## EXISTING ARTICLE
{existing_article}

## PARTIAL ARTICLES
{candidates}

## ARTICLE
"#,
            candidates = Self::numbered(candidates, "Partial article"),
        )
    }

    // ==================== Termination ====================

    /// System prompt for the editorial checklist
    pub fn termination_system() -> &'static str {
        "You are an expert-level AI writing editor. Your role is to decide whether to keep editing the ARTICLE."
    }

    /// User prompt for the editorial checklist
    pub fn termination_prompt(outline: &str, article: &str, conversation_history: &str) -> String {
        format!(
            r#"# Task Description
Decide whether:
1. To keep editing the ARTICLE, or
2. To return the ARTICLE to the requesting agent.

Use the CHECK LIST to decide whether to {keep}.

# Instructions
Consider every item in the CHECK LIST.
If any item is true, {keep}.
Be careful and accurate when completing the CHECK LIST.

# CHECK LIST
- If the ARTICLE still has placeholders or empty sections, {keep}.
- If the ARTICLE is incoherent, {keep}.
- If any ARTICLE subsection has fewer than three paragraphs, {keep}.
- If the ARTICLE does not include everything requested in the CONVERSATION HISTORY, {keep}.
- If the ARTICLE does not include every section and subsection of the ARTICLE OUTLINE, {keep}.
- WORD COUNT: what is the ARTICLE's word count?
- If the WORD COUNT is less than 1500 words, {keep}.
- SECTIONS and SUBSECTIONS: does the ARTICLE contain every section and subsection of the ARTICLE OUTLINE?
- If the ARTICLE is missing SECTIONS or SUBSECTIONS from the ARTICLE OUTLINE, {keep}.
- If any section or subsection has fewer than three detailed paragraphs, {keep}.

## ARTICLE OUTLINE
{outline}

## ARTICLE
<article>
{article}
</article>

## CONVERSATION HISTORY
{conversation_history}

# Your Response (every CHECK LIST result, followed by exactly one of ["{keep}", "{ret}"])
"#,
            keep = KEEP_EDITING,
            ret = RETURN_TO_REQUESTER,
        )
    }

    // ==================== Workers ====================

    /// System prompt for the outline writer
    pub fn outline_writer_system() -> &'static str {
        "You are an expert research writer and editor. Your role is to create and refine the outlines of research articles in markdown format."
    }

    /// User prompt for the outline writer
    pub fn outline_writer_prompt(
        conversation_history: &str,
        outline: &str,
        instructions: &str,
    ) -> String {
        format!(
            r#"# Task Description
Write or revise the outline of a research article.
First consider the CONVERSATION HISTORY and the ARTICLE OUTLINE.
Then follow the INSTRUCTIONS and write a NEW OR IMPROVED OUTLINE for the article.
Always write the outline in markdown with appropriate section headers.

## CONVERSATION HISTORY
{conversation_history}

## ARTICLE OUTLINE
{outline}

## INSTRUCTIONS
{instructions}

## NEW OR IMPROVED OUTLINE
"#
        )
    }

    /// System prompt for the article writer
    pub fn article_writer_system() -> &'static str {
        "You are an expert research writer and editor. Your role is to write or revise detailed sections of research articles in markdown format."
    }

    /// User prompt for the article writer
    pub fn article_writer_prompt(
        conversation_history: &str,
        outline: &str,
        article: &str,
        instructions: &str,
    ) -> String {
        format!(
            r#"# Task Description
Write specific sections of a research article from your own knowledge.
First consider the CONVERSATION HISTORY, the ARTICLE OUTLINE, the ARTICLE and the INSTRUCTIONS.
Then revise the article according to the instructions.
Write the entire REVISED ARTICLE in markdown.

## CONVERSATION HISTORY
{conversation_history}

## ARTICLE OUTLINE
{outline}

## ARTICLE
{article}

## INSTRUCTIONS
{instructions}

## REVISED ARTICLE
"#
        )
    }

    /// System prompt for the research notes worker
    pub fn research_notes_system() -> &'static str {
        "You are a meticulous research assistant. Your role is to collect facts, dates and context that help writers complete research articles."
    }

    /// User prompt for the research notes worker
    pub fn research_notes_prompt(
        conversation_history: &str,
        outline: &str,
        instructions: &str,
    ) -> String {
        format!(
            r#"# Task Description
Collect background notes for the article described in the CONVERSATION HISTORY and the ARTICLE OUTLINE.
Follow the INSTRUCTIONS. Write short factual bullet points; do not write article prose.

## CONVERSATION HISTORY
{conversation_history}

## ARTICLE OUTLINE
{outline}

## INSTRUCTIONS
{instructions}

## NOTES
"#
        )
    }

    fn numbered(candidates: &[&str], label: &str) -> String {
        candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("--- {} {} ---\n{}", label, i + 1, c))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
