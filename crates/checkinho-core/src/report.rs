//! Plain-text rendering of a run outcome.

use crate::run::RunOutcome;

/// Render the transcription of every extracted document, the in-scope
/// check lines and the process status.
pub fn render_text(outcome: &RunOutcome) -> String {
    let mut output = String::new();

    output.push_str(&format!("Relatório de Verificação: {}\n\n", outcome.name));
    output.push_str("Transcrição das informações extraídas:\n");
    output.push_str(&format!("- OS: {}\n", outcome.os.fields));
    output.push_str(&format!("- AP: {}\n", outcome.ap.fields));

    if outcome.ats.is_empty() {
        output.push_str("- AT: Nenhum arquivo AT encontrado.\n");
    }
    for at in &outcome.ats {
        output.push_str(&format!("- AT ({}): {}\n", at.file_name(), at.fields));
    }

    output.push_str(&format!(
        "- SICAF ({}): {}\n",
        outcome.sicaf_subtype, outcome.sicaf.fields
    ));

    if !outcome.missing_at_numbers.is_empty() {
        output.push_str(&format!(
            "- ATs informados no AP sem arquivo: {}\n",
            outcome.missing_at_numbers.join(", ")
        ));
    }

    output.push('\n');
    for check in outcome.scoped_checks() {
        output.push_str(&format!("{}\n", check));
    }

    output.push_str(&format!("\nStatus do Processo: {}\n", outcome.verdict.status));
    output
}
