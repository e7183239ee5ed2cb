//! 분류 이력 캐시.
//!
//! 세션 동안만 유지되는 메모리 이력 (FIFO, 최대 크기 제한).

use chrono::Utc;
use emailai_core::config::HistoryConfig;
use emailai_core::models::classification::{Category, ClassificationResult};
use emailai_core::models::history::HistoryEntry;
use std::collections::VecDeque;

/// 분류 이력 (추가 전용, 초과 시 가장 오래된 항목 제거)
#[derive(Debug)]
pub struct ClassificationHistory {
    entries: VecDeque<HistoryEntry>,
    /// None이면 무제한
    max_entries: Option<usize>,
    next_id: u64,
}

impl ClassificationHistory {
    /// 새 이력 캐시 생성
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
            next_id: 1,
        }
    }

    /// 설정에서 생성
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.cap())
    }

    /// 이력에 추가하고 새 항목 ID 반환
    pub fn add(
        &mut self,
        email: String,
        content_preview: String,
        file_name: Option<String>,
        analyzed_at: String,
        result: ClassificationResult,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push_back(HistoryEntry {
            id,
            created_at: Utc::now(),
            email,
            content_preview,
            file_name,
            analyzed_at,
            result,
        });

        if let Some(max) = self.max_entries {
            while self.entries.len() > max {
                self.entries.pop_front();
            }
        }
        id
    }

    /// ID로 조회
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// 최근 이력 조회 (최신 순)
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// 전체 이력 (오래된 순)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// 전체 이력 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어있는지
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 최대 보관 수
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// 이력 비우기 (ID 순번은 유지)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 통계: 카테고리별 건수
    pub fn stats(&self) -> HistoryStats {
        let produtivo = self
            .entries
            .iter()
            .filter(|entry| entry.result.category == Category::Produtivo)
            .count();

        HistoryStats {
            total: self.entries.len(),
            produtivo,
            improdutivo: self.entries.len() - produtivo,
        }
    }
}

/// 이력 통계
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub produtivo: usize,
    pub improdutivo: usize,
}
