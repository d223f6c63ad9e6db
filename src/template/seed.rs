/// A template created automatically for a language.
pub struct SeedTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

const BLANK: SeedTemplate = SeedTemplate {
    name: "blank",
    description: "A blank file",
    body: "",
};

const PYTHON_HELLO: SeedTemplate = SeedTemplate {
    name: "hello world",
    description: "A simple 'hello world' file.",
    body: "print(\"Hello, World!\")\n",
};

const PYTHON_MAIN: SeedTemplate = SeedTemplate {
    name: "if name main",
    description: "A file with the 'if name main' boilerplate code.",
    body: "def main():
    print(\"Hello, World!\")


if __name__ == '__main__':
    main()
",
};

const CSHARP_PROJECT_HELLO: SeedTemplate = SeedTemplate {
    name: "hello world",
    description: "A simple 'hello world' file.",
    body: "namespace project;

class Program
{
    static void Main(string[] args)
    {
        Console.WriteLine(\"Hello, World!\");
    }
}
",
};

const CSHARP_SCRIPT_HELLO: SeedTemplate = SeedTemplate {
    name: "hello world",
    description: "A simple 'hello world' file.",
    body: "Console.WriteLine(\"Hello, World!\");\n",
};

/// Built-in templates for a language id. Every language gets `blank`.
pub fn builtin_templates(language_id: &str) -> Vec<&'static SeedTemplate> {
    let mut seeds: Vec<&'static SeedTemplate> = match language_id {
        "python" => vec![&PYTHON_HELLO, &PYTHON_MAIN],
        "cs_project" => vec![&CSHARP_PROJECT_HELLO],
        "cs_script" => vec![&CSHARP_SCRIPT_HELLO],
        _ => Vec::new(),
    };
    seeds.push(&BLANK);
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_gets_blank() {
        for id in ["python", "cs_script", "cs_project", "lua"] {
            let names: Vec<_> = builtin_templates(id).iter().map(|s| s.name).collect();
            assert!(names.contains(&"blank"), "{id} missing blank");
        }
    }

    #[test]
    fn blank_has_empty_body() {
        assert!(BLANK.body.is_empty());
    }

    #[test]
    fn unknown_language_only_gets_blank() {
        assert_eq!(builtin_templates("lua").len(), 1);
    }
}
