//! Prompt pools and follow-up selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::category::{Category, ResponseCategory};
use crate::error::AppError;

const BUILTIN_PROMPTS: &[(ResponseCategory, &[&str])] = &[
    (
        ResponseCategory::AudienceFollowup,
        &[
            "Can you tell us more about that part?",
            "What happened right after that?",
            "What was going through your mind in that moment?",
            "How did you feel when that happened?",
        ],
    ),
    (
        ResponseCategory::EvaluationFear,
        &[
            "When you say you felt judged, what did you think people were thinking?",
            "What reaction from others were you most worried about?",
            "What felt most awkward in that moment?",
        ],
    ),
    (
        ResponseCategory::Avoidance,
        &[
            "What made you decide not to tell anyone at first?",
            "Was there a moment you wanted to speak up but didn’t?",
            "What felt too risky about sharing it back then?",
        ],
    ),
    (
        ResponseCategory::Somatic,
        &[
            "Did your body react in any way when you were stressed?",
            "What did you notice physically when you were anxious?",
            "Was there a point where it felt like your nerves peaked?",
        ],
    ),
    (
        ResponseCategory::EncouragingReflection,
        &[
            "What do you think helped you get through it?",
            "Looking back, what are you proud of?",
            "What would you want others to understand about that experience?",
        ],
    ),
    (
        ResponseCategory::Hesitation,
        &[
            "Take your time. Which part is hardest to talk about?",
            "If you’re not sure where to start, what’s the first thing that comes to mind?",
            "What detail feels most important to mention?",
        ],
    ),
];

/// Words in the recent narrative that signal the speaker reached a growth part
const REFLECTION_KEYWORDS: &[&str] = &["help", "support", "learned", "improved", "recovered", "managed"];

/// Non-empty, ordered list of prompts
#[derive(Debug, Clone)]
pub struct PromptPool {
    prompts: Vec<String>,
}

impl PromptPool {
    pub fn new(prompts: Vec<String>) -> Result<Self, AppError> {
        if prompts.is_empty() {
            return Err(AppError::Config("prompt pool is empty".to_string()));
        }
        Ok(Self { prompts })
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Never true for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    fn pick(&self, picker: &dyn PromptPicker) -> &str {
        let index = picker.pick_index(self.prompts.len()) % self.prompts.len();
        &self.prompts[index]
    }
}

/// One pool per response category, stored in `ResponseCategory::ALL` order
#[derive(Debug, Clone)]
pub struct PromptPools {
    pools: Vec<PromptPool>,
}

impl PromptPools {
    pub fn builtin() -> Result<Self, AppError> {
        let pools = BUILTIN_PROMPTS
            .iter()
            .map(|(category, prompts)| {
                (*category, prompts.iter().map(|p| (*p).to_string()).collect())
            })
            .collect();
        Self::from_map(pools)
    }

    /// Build pools, failing unless every response category has a non-empty pool
    pub fn from_map(pools: BTreeMap<ResponseCategory, Vec<String>>) -> Result<Self, AppError> {
        let mut validated = Vec::with_capacity(ResponseCategory::ALL.len());
        for category in ResponseCategory::ALL {
            let prompts = pools.get(&category).cloned().unwrap_or_default();
            let pool = PromptPool::new(prompts).map_err(|_| {
                AppError::Config(format!("prompt pool '{}' is empty", category))
            })?;
            validated.push(pool);
        }
        Ok(Self { pools: validated })
    }

    pub fn pool(&self, category: ResponseCategory) -> &PromptPool {
        &self.pools[category.index()]
    }

    /// Total number of prompts across pools
    pub fn total_prompts(&self) -> usize {
        self.pools.iter().map(PromptPool::len).sum()
    }
}

/// Source of the index used to draw a prompt from a pool.
///
/// Implementations must be safe to share between threads.
pub trait PromptPicker: Send + Sync {
    /// Return an index in `0..len`; `len` is never zero
    fn pick_index(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl PromptPicker for ThreadRngPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform draw from a seeded generator, for reproducible runs
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PromptPicker for SeededPicker {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Outcome of prompt selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: ResponseCategory,
    pub question: String,
    pub score: u32,
}

/// Maps a detection (or hesitation) onto a pool and draws a question
pub struct PromptSelector {
    pools: PromptPools,
    picker: Box<dyn PromptPicker>,
}

impl PromptSelector {
    pub fn new(pools: PromptPools, picker: Box<dyn PromptPicker>) -> Self {
        Self { pools, picker }
    }

    pub fn pools(&self) -> &PromptPools {
        &self.pools
    }

    /// Pick the response category and question.
    ///
    /// `Safety` has no pool of its own: it goes through the same context
    /// branch as `Default` and keeps its score.
    pub fn select(
        &self,
        category: Category,
        score: u32,
        hesitant: bool,
        recent_context: Option<&str>,
    ) -> Selection {
        if hesitant {
            return self.draw(ResponseCategory::Hesitation, 0);
        }

        let response_category = ResponseCategory::for_detected(category).unwrap_or_else(|| {
            if mentions_growth(recent_context.unwrap_or("")) {
                ResponseCategory::EncouragingReflection
            } else {
                ResponseCategory::AudienceFollowup
            }
        });

        self.draw(response_category, score)
    }

    fn draw(&self, category: ResponseCategory, score: u32) -> Selection {
        let question = self
            .pools
            .pool(category)
            .pick(self.picker.as_ref())
            .to_string();
        Selection {
            category,
            question,
            score,
        }
    }
}

/// Whether the recent narrative contains any reflection keyword (case-insensitive substring)
pub fn mentions_growth(recent_context: &str) -> bool {
    let lower = recent_context.to_lowercase();
    REFLECTION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pools_cover_every_category() {
        let pools = PromptPools::builtin().unwrap();
        for category in ResponseCategory::ALL {
            assert!(!pools.pool(category).is_empty(), "empty pool {}", category);
        }
        assert_eq!(pools.total_prompts(), 19);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut map: BTreeMap<ResponseCategory, Vec<String>> = BTreeMap::new();
        for category in ResponseCategory::ALL {
            map.insert(category, vec!["Why?".to_string()]);
        }
        map.insert(ResponseCategory::Somatic, vec![]);

        let err = PromptPools::from_map(map).unwrap_err();
        assert!(err.to_string().contains("somatic"));
    }

    #[test]
    fn test_pool_lookup_matches_category() {
        let pools = PromptPools::builtin().unwrap();
        assert_eq!(pools.pool(ResponseCategory::AudienceFollowup).len(), 4);
        assert_eq!(
            pools.pool(ResponseCategory::Hesitation).prompts()[2],
            "What detail feels most important to mention?"
        );
        assert_eq!(
            pools.pool(ResponseCategory::EncouragingReflection).prompts()[1],
            "Looking back, what are you proud of?"
        );
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let a = SeededPicker::new(42);
        let b = SeededPicker::new(42);
        let first: Vec<usize> = (0..16).map(|_| a.pick_index(4)).collect();
        let second: Vec<usize> = (0..16).map(|_| b.pick_index(4)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|i| *i < 4));
    }

    #[test]
    fn test_growth_keywords() {
        assert!(mentions_growth("My friends SUPPORTED me"));
        assert!(!mentions_growth("it was a long day"));
        assert!(!mentions_growth(""));
    }
}
