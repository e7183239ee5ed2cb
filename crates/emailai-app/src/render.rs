//! 터미널 출력 렌더링.

use emailai_workflow::presenter::{HistoryItemView, ResultView};
use std::fmt::Write;

/// 분석 결과 블록
pub fn render_result(view: &ResultView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "━━ {} ({})", view.title, view.category.label);
    let _ = writeln!(out, "Confiança: {}", view.confidence_text);
    let _ = writeln!(
        out,
        "Tom: {} · Urgência: {} · Complexidade: {}",
        view.tone.label, view.urgency.label, view.complexity.label
    );
    if !view.email_type.is_empty() {
        let _ = writeln!(out, "Tipo: {}", view.email_type);
    }
    if !view.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", view.tags.join(", "));
    }
    if !view.reasoning.is_empty() {
        let _ = writeln!(out, "\nAnálise:\n  {}", view.reasoning);
    }
    if !view.key_points.is_empty() {
        let _ = writeln!(out, "\nPontos-chave:");
        for point in &view.key_points {
            let _ = writeln!(out, "  • {point}");
        }
    }
    if !view.entities.is_empty() {
        let _ = writeln!(out, "\nEntidades ({}):", view.entity_count);
        for (label, values) in &view.entities {
            let _ = writeln!(out, "  {label}: {}", values.join(", "));
        }
    }
    if !view.actions.is_empty() {
        let _ = writeln!(out, "\nAções sugeridas:");
        for action in &view.actions {
            let _ = writeln!(out, "  [{}] {}", action.priority.label, action.action);
        }
    }

    let _ = writeln!(out, "\nResposta sugerida:");
    for line in view.response.lines() {
        let _ = writeln!(out, "  {line}");
    }
    if !view.estimated_response_time.is_empty() {
        let _ = writeln!(
            out,
            "\nTempo estimado de resposta: {}",
            view.estimated_response_time
        );
    }

    out
}

/// 이력 목록 (최신 순)
pub fn render_history(items: &[HistoryItemView]) -> String {
    if items.is_empty() {
        return "Nenhuma análise no histórico.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let source = item
            .file_name
            .as_deref()
            .map(|name| format!(" [{name}]"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "#{:<3} {:<11} {:>4}  {:<10}{} {}",
            item.id,
            item.category.label,
            item.confidence_text,
            item.time_text,
            source,
            item.preview.replace('\n', " ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailai_core::models::classification::*;
    use emailai_workflow::presenter::{category_descriptor, present};

    fn result() -> ClassificationResult {
        ClassificationResult {
            category: Category::Produtivo,
            confidence: 0.87,
            sentiment: Sentiment {
                tone: Tone::Formal,
                urgency: Urgency::Alta,
            },
            email_type: "Solicitação".to_string(),
            tags: vec!["financeiro".to_string()],
            entities: Entities::default(),
            reasoning: "Pede envio de boleto".to_string(),
            key_points: vec!["Boleto vencido".to_string()],
            suggested_actions: vec![SuggestedAction {
                action: "Enviar segunda via".to_string(),
                priority: ActionPriority::Alta,
            }],
            suggested_response: "Olá,\nsegue o boleto.".to_string(),
            estimated_response_time: "1 dia".to_string(),
            complexity: Complexity::Simples,
        }
    }

    #[test]
    fn result_block_contains_key_fields() {
        let text = render_result(&present(&result(), None));
        assert!(text.contains("Email de Trabalho"));
        assert!(text.contains("Confiança: 87%"));
        assert!(text.contains("Urgência: Alta"));
        assert!(text.contains("[Alta] Enviar segunda via"));
        assert!(text.contains("  segue o boleto."));
        assert!(!text.contains("Entidades"));
    }

    #[test]
    fn entities_listed_with_total() {
        let mut result = result();
        result.entities.people = vec!["Ana".to_string(), "Rui".to_string()];
        result.entities.organizations = vec!["ACME".to_string()];

        let text = render_result(&present(&result, None));
        assert!(text.contains("Entidades (3):"));
        assert!(text.contains("  Pessoas: Ana, Rui"));
        assert!(text.contains("  Organizações: ACME"));
    }

    #[test]
    fn empty_history() {
        assert_eq!(render_history(&[]), "Nenhuma análise no histórico.\n");
    }

    #[test]
    fn history_line_flattens_preview() {
        let item = HistoryItemView {
            id: 3,
            category: category_descriptor(Category::Improdutivo),
            confidence_text: "75%".to_string(),
            preview: "Feliz\nNatal".to_string(),
            file_name: Some("cartao.txt".to_string()),
            time_text: "agora".to_string(),
        };
        let text = render_history(&[item]);
        assert!(text.starts_with("#3"));
        assert!(text.contains("[cartao.txt]"));
        assert!(text.contains("Feliz Natal"));
    }
}
