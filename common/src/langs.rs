use phf::phf_ordered_map;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Lang {
    pub display_name: &'static str,
    /// Mode name understood by the editor for syntax highlighting
    pub editor_mode: &'static str,
    pub default_code: &'static str,
}

pub static LANGS: phf::OrderedMap<&'static str, Lang> = phf_ordered_map! {
    "javascript" => Lang {
        display_name: "JavaScript",
        editor_mode: "javascript",
        default_code: "function solution() {\n  // Write your code here\n}\n",
    },
    "python" => Lang {
        display_name: "Python",
        editor_mode: "python",
        default_code: "def solution():\n    # Write your code here\n    pass\n",
    },
    "java" => Lang {
        display_name: "Java",
        editor_mode: "text/x-java",
        default_code: "public class Solution {\n    public static void main(String[] args) {\n        // Write your code here\n    }\n}",
    },
    "cpp" => Lang {
        display_name: "C++",
        editor_mode: "text/x-c++src",
        default_code: "#include <iostream>\n\nint main() {\n    // Write your code here\n    return 0;\n}",
    },
};

/// Language the editor opens with when none was chosen.
pub const DEFAULT_LANGUAGE: &str = "javascript";

#[derive(Serialize)]
pub struct LanguageOption {
    pub id: &'static str,
    pub display_name: &'static str,
}

pub fn language_options() -> Vec<LanguageOption> {
    LANGS
        .entries()
        .map(|(&id, lang)| LanguageOption {
            id,
            display_name: lang.display_name,
        })
        .collect()
}
