//! The fixed set of challenges offered on the site.
//!
//! The catalog is compiled into the binary and never changes at runtime.
//! Progress and submissions refer to challenges by their string id.

use phf::phf_ordered_map;
use serde::Serialize;

use crate::{
    langs::LANGS,
    sql_enums::ChallengeDifficulty,
};

/// Title shown for a stored challenge id that is no longer in the catalog.
pub const UNKNOWN_CHALLENGE_TITLE: &str = "Unknown challenge";

#[derive(Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: ChallengeDifficulty,
    pub image_url: &'static str,
    /// `(language, code)` pairs, languages without an entry use the
    /// language's default template
    #[serde(skip)]
    pub starter_code: &'static [(&'static str, &'static str)],
}

impl Challenge {
    /// Starter code for `language`, `None` if the language is not offered.
    pub fn starter_code_for(&self, language: &str) -> Option<&'static str> {
        let lang = LANGS.get(language)?;
        Some(
            self.starter_code
                .iter()
                .find(|(name, _)| *name == language)
                .map(|(_, code)| *code)
                .unwrap_or(lang.default_code),
        )
    }
}

pub static CHALLENGES: phf::OrderedMap<&'static str, Challenge> = phf_ordered_map! {
    "1" => Challenge {
        id: "1",
        title: "Two Sum",
        description: "Find two numbers in the array that add up to the target.",
        difficulty: ChallengeDifficulty::Easy,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Two+Sum+Problem",
        starter_code: &[
            ("javascript", "function twoSum(nums, target) {\n  // Write your code here\n}\n"),
            ("python", "def two_sum(nums, target):\n    # Write your code here\n    pass\n"),
        ],
    },
    "2" => Challenge {
        id: "2",
        title: "Valid Parentheses",
        description: "Determine if the input string has valid parentheses.",
        difficulty: ChallengeDifficulty::Easy,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Valid+Parentheses+Problem",
        starter_code: &[
            ("javascript", "function isValid(s) {\n  // Write your code here\n}\n"),
            ("python", "def is_valid(s):\n    # Write your code here\n    pass\n"),
        ],
    },
    "3" => Challenge {
        id: "3",
        title: "Longest Substring Without Repeating Characters",
        description: "Find the length of the longest substring without repeating characters.",
        difficulty: ChallengeDifficulty::Medium,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Longest+Substring+Problem",
        starter_code: &[
            ("javascript", "function lengthOfLongestSubstring(s) {\n  // Write your code here\n}\n"),
            ("python", "def length_of_longest_substring(s):\n    # Write your code here\n    pass\n"),
        ],
    },
    "4" => Challenge {
        id: "4",
        title: "LRU Cache",
        description: "Implement an LRU Cache with get and put operations.",
        difficulty: ChallengeDifficulty::Medium,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=LRU+Cache+Problem",
        starter_code: &[
            ("javascript", "class LRUCache {\n  constructor(capacity) {\n  }\n\n  get(key) {\n  }\n\n  put(key, value) {\n  }\n}\n"),
            ("python", "class LRUCache:\n    def __init__(self, capacity):\n        pass\n\n    def get(self, key):\n        pass\n\n    def put(self, key, value):\n        pass\n"),
        ],
    },
    "5" => Challenge {
        id: "5",
        title: "Merge K Sorted Lists",
        description: "Merge k sorted linked lists into one sorted linked list.",
        difficulty: ChallengeDifficulty::Hard,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Merge+K+Sorted+Lists+Problem",
        starter_code: &[
            ("python", "def merge_k_lists(lists):\n    # Write your code here\n    pass\n"),
        ],
    },
    "6" => Challenge {
        id: "6",
        title: "Reverse Linked List",
        description: "Reverse a singly linked list.",
        difficulty: ChallengeDifficulty::Easy,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Reverse+Linked+List+Problem",
        starter_code: &[
            ("python", "def reverse_list(head):\n    # Write your code here\n    pass\n"),
        ],
    },
    "7" => Challenge {
        id: "7",
        title: "Maximum Subarray",
        description: "Find the contiguous subarray with the largest sum.",
        difficulty: ChallengeDifficulty::Easy,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Maximum+Subarray+Problem",
        starter_code: &[
            ("javascript", "function maxSubArray(nums) {\n  // Write your code here\n}\n"),
            ("python", "def max_sub_array(nums):\n    # Write your code here\n    pass\n"),
        ],
    },
    "8" => Challenge {
        id: "8",
        title: "Binary Tree Level Order Traversal",
        description: "Return the level order traversal of a binary tree's values.",
        difficulty: ChallengeDifficulty::Medium,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Binary+Tree+Level+Order+Traversal+Problem",
        starter_code: &[],
    },
    "9" => Challenge {
        id: "9",
        title: "Trapping Rain Water",
        description: "Calculate how much water can be trapped after raining.",
        difficulty: ChallengeDifficulty::Hard,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Trapping+Rain+Water+Problem",
        starter_code: &[
            ("python", "def trap(height):\n    # Write your code here\n    pass\n"),
        ],
    },
    "10" => Challenge {
        id: "10",
        title: "Word Search",
        description: "Determine if a word exists in a grid of letters.",
        difficulty: ChallengeDifficulty::Medium,
        image_url: "https://placehold.co/800x400/e2e8f0/1e293b?text=Word+Search+Problem",
        starter_code: &[],
    },
};

pub fn get_challenge(id: &str) -> Option<&'static Challenge> {
    CHALLENGES.get(id)
}

/// Catalog order, which is the order the dashboard shows.
pub fn all_challenges() -> impl Iterator<Item = &'static Challenge> {
    CHALLENGES.values()
}

pub fn challenge_title(id: &str) -> &'static str {
    get_challenge(id)
        .map(|challenge| challenge.title)
        .unwrap_or(UNKNOWN_CHALLENGE_TITLE)
}
