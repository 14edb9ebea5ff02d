//! Local fallback solutions: a small canned bank matched by keywords, plus a
//! per-language template. Used when every backend candidate fails, so the UI
//! always has something to show.
//!
//! Fallback text uses the same markers as backend responses, so it goes
//! through the interpreter like anything else.

use tracing::debug;

use crate::config::FallbackCfg;
use crate::domain::{Language, ProblemRequest};

#[derive(Clone, Debug)]
pub struct FallbackEntry {
  pub language: Language,
  pub title: String,
  pub keywords: Vec<String>,
  pub code: String,
  pub explanation: Option<String>,
}

impl From<&FallbackCfg> for FallbackEntry {
  fn from(c: &FallbackCfg) -> Self {
    Self {
      language: c.language,
      title: c.title.clone(),
      keywords: c.keywords.iter().map(|k| k.to_lowercase()).collect(),
      code: c.code.clone(),
      explanation: c.explanation.clone(),
    }
  }
}

/// A fallback answer ready for interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackSolution {
  /// Title of the matched entry; `None` when the template was used.
  pub matched: Option<String>,
  pub text: String,
}

#[derive(Clone, Debug)]
pub struct FallbackBank {
  entries: Vec<FallbackEntry>,
}

impl FallbackBank {
  /// Configured entries first, then the built-in ones.
  pub fn new(configured: &[FallbackCfg]) -> Self {
    let mut entries: Vec<FallbackEntry> = configured.iter().map(FallbackEntry::from).collect();
    entries.extend(builtin_entries());
    Self { entries }
  }

  pub fn len(&self) -> usize { self.entries.len() }

  /// Best keyword match for the request's language, else the language template.
  /// Ties keep the earlier entry, so configured entries win over built-ins.
  pub fn solve(&self, req: &ProblemRequest) -> FallbackSolution {
    let problem = req.text.to_lowercase();
    let mut best: Option<(&FallbackEntry, usize)> = None;
    for e in self.entries.iter().filter(|e| e.language == req.language) {
      let score = e.keywords.iter().filter(|k| problem.contains(k.as_str())).count();
      if score > 0 && best.map(|(_, s)| score > s).unwrap_or(true) {
        best = Some((e, score));
      }
    }

    match best {
      Some((e, score)) => {
        debug!(target: "solve", id = %req.id, title = %e.title, score, "Fallback matched canned solution");
        FallbackSolution {
          matched: Some(e.title.clone()),
          text: render(req.language, &e.code, e.explanation.as_deref()),
        }
      }
      None => {
        debug!(target: "solve", id = %req.id, language = %req.language, "Fallback using language template");
        FallbackSolution { matched: None, text: render(req.language, template(req.language), None) }
      }
    }
  }
}

fn render(language: Language, code: &str, explanation: Option<&str>) -> String {
  let mut out = format!("## 💻 Solution\n{}\n{}", language.id(), code.trim_end());
  if let Some(exp) = explanation {
    out.push_str(&format!("\n## 📝 Explanation\n{}", exp.trim()));
  }
  out.push_str("\n## ⚠️ Offline\nThe solve service is unreachable, so this answer comes from the local bank.");
  out
}

/// Starter skeleton per language.
pub fn template(language: Language) -> &'static str {
  match language {
    Language::Python => "class Solution:\n    def solve(self, *args):\n        # Write your solution here\n        pass",
    Language::JavaScript => "/**\n * @return {*}\n */\nvar solve = function(...args) {\n    // Write your solution here\n};",
    Language::Java => "class Solution {\n    public Object solve(Object... args) {\n        // Write your solution here\n        return null;\n    }\n}",
    Language::Cpp => "class Solution {\npublic:\n    void solve() {\n        // Write your solution here\n    }\n};",
    Language::CSharp => "public class Solution {\n    public object Solve(params object[] args) {\n        // Write your solution here\n        return null;\n    }\n}",
    Language::Go => "func solve() {\n    // Write your solution here\n}",
    Language::Rust => "impl Solution {\n    pub fn solve() {\n        // Write your solution here\n    }\n}",
    Language::TypeScript => "function solve(...args: unknown[]): unknown {\n    // Write your solution here\n    return undefined;\n}",
  }
}

fn entry(language: Language, title: &str, keywords: &[&str], code: &str, explanation: &str) -> FallbackEntry {
  FallbackEntry {
    language,
    title: title.into(),
    keywords: keywords.iter().map(|k| k.to_string()).collect(),
    code: code.into(),
    explanation: Some(explanation.into()),
  }
}

fn builtin_entries() -> Vec<FallbackEntry> {
  const TWO_SUM_KEYS: &[&str] = &["two sum", "add up to target", "indices of the two numbers"];
  const TWO_SUM_EXPLANATION: &str = "- Walk the array once, remembering each value's index in a hash map.\n- For every value, check whether `target - value` was already seen.";
  const PARENS_KEYS: &[&str] = &["valid parentheses", "brackets", "open brackets"];
  const PARENS_EXPLANATION: &str = "- Push opening brackets on a stack.\n- Every closing bracket must match the top of the stack.";

  vec![
    entry(
      Language::Python,
      "Two Sum",
      TWO_SUM_KEYS,
      "class Solution:\n    def twoSum(self, nums: List[int], target: int) -> List[int]:\n        seen = {}\n        for i, n in enumerate(nums):\n            if target - n in seen:\n                return [seen[target - n], i]\n            seen[n] = i\n        return []",
      TWO_SUM_EXPLANATION,
    ),
    entry(
      Language::JavaScript,
      "Two Sum",
      TWO_SUM_KEYS,
      "var twoSum = function(nums, target) {\n    const seen = new Map();\n    for (let i = 0; i < nums.length; i++) {\n        if (seen.has(target - nums[i])) return [seen.get(target - nums[i]), i];\n        seen.set(nums[i], i);\n    }\n    return [];\n};",
      TWO_SUM_EXPLANATION,
    ),
    entry(
      Language::Java,
      "Two Sum",
      TWO_SUM_KEYS,
      "class Solution {\n    public int[] twoSum(int[] nums, int target) {\n        Map<Integer, Integer> seen = new HashMap<>();\n        for (int i = 0; i < nums.length; i++) {\n            Integer j = seen.get(target - nums[i]);\n            if (j != null) return new int[] { j, i };\n            seen.put(nums[i], i);\n        }\n        return new int[0];\n    }\n}",
      TWO_SUM_EXPLANATION,
    ),
    entry(
      Language::Go,
      "Two Sum",
      TWO_SUM_KEYS,
      "func twoSum(nums []int, target int) []int {\n    seen := map[int]int{}\n    for i, n := range nums {\n        if j, ok := seen[target-n]; ok {\n            return []int{j, i}\n        }\n        seen[n] = i\n    }\n    return nil\n}",
      TWO_SUM_EXPLANATION,
    ),
    entry(
      Language::Rust,
      "Two Sum",
      TWO_SUM_KEYS,
      "impl Solution {\n    pub fn two_sum(nums: Vec<i32>, target: i32) -> Vec<i32> {\n        let mut seen = std::collections::HashMap::new();\n        for (i, n) in nums.iter().enumerate() {\n            if let Some(&j) = seen.get(&(target - n)) {\n                return vec![j as i32, i as i32];\n            }\n            seen.insert(*n, i);\n        }\n        vec![]\n    }\n}",
      TWO_SUM_EXPLANATION,
    ),
    entry(
      Language::Python,
      "Valid Parentheses",
      PARENS_KEYS,
      "class Solution:\n    def isValid(self, s: str) -> bool:\n        pairs = {')': '(', ']': '[', '}': '{'}\n        stack = []\n        for ch in s:\n            if ch in pairs:\n                if not stack or stack.pop() != pairs[ch]:\n                    return False\n            else:\n                stack.append(ch)\n        return not stack",
      PARENS_EXPLANATION,
    ),
  ]
}
