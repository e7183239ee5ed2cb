//! 결과 프레젠터.
//!
//! ClassificationResult / HistoryEntry → 화면 표시용 데이터 변환.
//! 열거형마다 `match`로 빠짐없이 매핑한다.

use chrono::{DateTime, Utc};
use emailai_core::models::classification::{
    ActionPriority, Category, ClassificationResult, Complexity, Tone, Urgency,
};
use emailai_core::models::history::HistoryEntry;

/// 표시 서술자 (라벨, 아이콘 이름, 색상 #RRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// 제안 조치 표시 데이터
#[derive(Debug, Clone)]
pub struct ActionView {
    pub action: String,
    pub priority: Descriptor,
}

/// 결과 표시 데이터
#[derive(Debug, Clone)]
pub struct ResultView {
    /// 제목 (카테고리 기반)
    pub title: &'static str,
    pub category: Descriptor,
    /// 신뢰도 텍스트 ("91%")
    pub confidence_text: String,
    pub tone: Descriptor,
    pub urgency: Descriptor,
    pub complexity: Descriptor,
    pub email_type: String,
    pub tags: Vec<String>,
    pub reasoning: String,
    pub key_points: Vec<String>,
    pub actions: Vec<ActionView>,
    /// 엔티티 (분류명, 값 목록): 비어있는 분류는 제외
    pub entities: Vec<(&'static str, Vec<String>)>,
    /// 전체 엔티티 수
    pub entity_count: usize,
    /// 표시할 응답 (편집본 우선)
    pub response: String,
    pub estimated_response_time: String,
}

/// ClassificationResult → ResultView 변환
pub fn present(result: &ClassificationResult, edited_response: Option<&str>) -> ResultView {
    let entities = [
        ("Pessoas", &result.entities.people),
        ("Datas", &result.entities.dates),
        ("Valores", &result.entities.values),
        ("Organizações", &result.entities.organizations),
    ]
    .into_iter()
    .filter(|(_, values)| !values.is_empty())
    .map(|(label, values)| (label, values.clone()))
    .collect();

    ResultView {
        title: category_title(result.category),
        category: category_descriptor(result.category),
        confidence_text: format!("{}%", result.confidence_percent()),
        tone: tone_descriptor(result.sentiment.tone),
        urgency: urgency_descriptor(result.sentiment.urgency),
        complexity: complexity_descriptor(result.complexity),
        email_type: result.email_type.clone(),
        tags: result.tags.clone(),
        reasoning: result.reasoning.clone(),
        key_points: result.key_points.clone(),
        actions: result
            .suggested_actions
            .iter()
            .map(|a| ActionView {
                action: a.action.clone(),
                priority: priority_descriptor(a.priority),
            })
            .collect(),
        entities,
        entity_count: result.entities.total(),
        response: edited_response
            .unwrap_or(result.suggested_response.as_str())
            .to_string(),
        estimated_response_time: result.estimated_response_time.clone(),
    }
}

/// 이력 목록 항목 표시 데이터
#[derive(Debug, Clone)]
pub struct HistoryItemView {
    pub id: u64,
    pub category: Descriptor,
    pub confidence_text: String,
    pub preview: String,
    pub file_name: Option<String>,
    /// 시간 텍스트 (상대)
    pub time_text: String,
}

/// HistoryEntry → HistoryItemView 변환
pub fn present_history(entry: &HistoryEntry, now: DateTime<Utc>) -> HistoryItemView {
    HistoryItemView {
        id: entry.id,
        category: category_descriptor(entry.result.category),
        confidence_text: format!("{}%", entry.result.confidence_percent()),
        preview: entry.content_preview.clone(),
        file_name: entry.file_name.clone(),
        time_text: format_relative_time(entry.created_at, now),
    }
}

/// 여러 이력 항목 일괄 변환
pub fn present_history_all<'a>(
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
    now: DateTime<Utc>,
) -> Vec<HistoryItemView> {
    entries
        .into_iter()
        .map(|e| present_history(e, now))
        .collect()
}

pub fn category_title(category: Category) -> &'static str {
    match category {
        Category::Produtivo => "Email de Trabalho",
        Category::Improdutivo => "Email Pessoal/Spam",
    }
}

pub fn category_descriptor(category: Category) -> Descriptor {
    match category {
        Category::Produtivo => Descriptor {
            label: "Produtivo",
            icon: "briefcase",
            color: "#22C55E", // green-500
        },
        Category::Improdutivo => Descriptor {
            label: "Improdutivo",
            icon: "coffee",
            color: "#F59E0B", // amber-500
        },
    }
}

pub fn tone_descriptor(tone: Tone) -> Descriptor {
    match tone {
        Tone::Urgente => Descriptor {
            label: "Urgente",
            icon: "alert-triangle",
            color: "#EF4444",
        },
        Tone::Formal => Descriptor {
            label: "Formal",
            icon: "briefcase",
            color: "#3B82F6",
        },
        Tone::Amigavel => Descriptor {
            label: "Amigável",
            icon: "smile",
            color: "#22C55E",
        },
        Tone::Neutro => Descriptor {
            label: "Neutro",
            icon: "minus",
            color: "#6B7280",
        },
        Tone::Critico => Descriptor {
            label: "Crítico",
            icon: "x-circle",
            color: "#DC2626",
        },
    }
}

pub fn urgency_descriptor(urgency: Urgency) -> Descriptor {
    match urgency {
        Urgency::Baixa => Descriptor {
            label: "Baixa",
            icon: "clock",
            color: "#22C55E",
        },
        Urgency::Media => Descriptor {
            label: "Média",
            icon: "clock",
            color: "#F59E0B",
        },
        Urgency::Alta => Descriptor {
            label: "Alta",
            icon: "alert-circle",
            color: "#F97316",
        },
        Urgency::Critica => Descriptor {
            label: "Crítica",
            icon: "zap",
            color: "#EF4444",
        },
    }
}

pub fn priority_descriptor(priority: ActionPriority) -> Descriptor {
    match priority {
        ActionPriority::Baixa => Descriptor {
            label: "Baixa",
            icon: "arrow-down",
            color: "#6B7280",
        },
        ActionPriority::Media => Descriptor {
            label: "Média",
            icon: "arrow-right",
            color: "#3B82F6",
        },
        ActionPriority::Alta => Descriptor {
            label: "Alta",
            icon: "arrow-up",
            color: "#EF4444",
        },
    }
}

pub fn complexity_descriptor(complexity: Complexity) -> Descriptor {
    match complexity {
        Complexity::Simples => Descriptor {
            label: "Simples",
            icon: "circle",
            color: "#22C55E",
        },
        Complexity::Moderada => Descriptor {
            label: "Moderada",
            icon: "layers",
            color: "#F59E0B",
        },
        Complexity::Complexa => Descriptor {
            label: "Complexa",
            icon: "git-branch",
            color: "#EF4444",
        },
    }
}

/// 상대 시간 ("agora", "há 5 min", ...)
pub fn format_relative_time(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - dt;

    if diff.num_seconds() < 60 {
        "agora".to_string()
    } else if diff.num_minutes() < 60 {
        format!("há {} min", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("há {} h", diff.num_hours())
    } else {
        format!("há {} d", diff.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::make_result;
    use chrono::Duration;

    #[test]
    fn present_result() {
        let mut result = make_result(Category::Produtivo, "Resposta original");
        result.confidence = 0.914;
        result.entities.dates = vec!["10/03".to_string()];

        let view = present(&result, None);
        assert_eq!(view.title, "Email de Trabalho");
        assert_eq!(view.confidence_text, "91%");
        assert_eq!(view.urgency.label, "Média");
        assert_eq!(view.response, "Resposta original");
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].priority.label, "Média");
        assert_eq!(view.entities, vec![("Datas", vec!["10/03".to_string()])]);
        assert_eq!(view.entity_count, 1);
    }

    #[test]
    fn edited_response_takes_precedence() {
        let result = make_result(Category::Improdutivo, "Original");
        let view = present(&result, Some("Editado"));
        assert_eq!(view.title, "Email Pessoal/Spam");
        assert_eq!(view.response, "Editado");
    }

    #[test]
    fn tone_labels_have_accents() {
        assert_eq!(tone_descriptor(Tone::Amigavel).label, "Amigável");
        assert_eq!(tone_descriptor(Tone::Critico).label, "Crítico");
        assert_eq!(urgency_descriptor(Urgency::Critica).label, "Crítica");
    }

    #[test]
    fn category_colors() {
        assert_eq!(category_descriptor(Category::Produtivo).color, "#22C55E");
        assert_eq!(category_descriptor(Category::Improdutivo).color, "#F59E0B");
    }

    #[test]
    fn relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "agora");
        assert_eq!(format_relative_time(now - Duration::minutes(5), now), "há 5 min");
        assert_eq!(format_relative_time(now - Duration::hours(3), now), "há 3 h");
        assert_eq!(format_relative_time(now - Duration::days(2), now), "há 2 d");
    }

    #[test]
    fn present_history_items() {
        let now = Utc::now();
        let entry = HistoryEntry {
            id: 7,
            created_at: now - Duration::minutes(2),
            email: "Bom dia, tudo bem?".to_string(),
            content_preview: "Bom dia...".to_string(),
            file_name: None,
            analyzed_at: String::new(),
            result: make_result(Category::Improdutivo, ""),
        };

        let views = present_history_all([&entry, &entry], now);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, 7);
        assert_eq!(views[0].category.label, "Improdutivo");
        assert_eq!(views[0].time_text, "há 2 min");
        assert_eq!(views[0].confidence_text, "90%");
    }
}
