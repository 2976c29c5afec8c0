//! Minimal Java source IR
//!
//! Only what the generated plugin needs: one top-level class per file, a
//! sorted import set, and members that are either methods or pre-formatted
//! blocks (helper methods, nested classes). Rendering owns all indentation;
//! member text is stored unindented.

use std::collections::BTreeSet;
use std::fmt;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    /// Sorted and deduplicated on insertion
    pub imports: BTreeSet<String>,
    pub class: JavaClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    pub name: String,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(Method),
    /// Verbatim text, indented one level on render
    Block(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub annotations: Vec<String>,
    /// Everything before the opening brace, e.g. `public void onEnable()`
    pub signature: String,
    /// Body lines relative to the method's own indentation
    pub body: Vec<String>,
}

impl JavaFile {
    pub fn new(package: &str, class: JavaClass) -> Self {
        JavaFile {
            package: package.to_string(),
            imports: BTreeSet::new(),
            class,
        }
    }

    pub fn import<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
    }

    /// `<package path>/<Class>.java`
    pub fn relative_path(&self) -> String {
        format!("{}/{}.java", self.package.replace('.', "/"), self.class.name)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl JavaClass {
    pub fn new(name: &str) -> Self {
        JavaClass {
            name: name.to_string(),
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
        }
    }
}

impl Method {
    pub fn new(signature: &str) -> Self {
        Method {
            annotations: Vec::new(),
            signature: signature.to_string(),
            body: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: &str) -> Self {
        self.annotations.push(annotation.to_string());
        self
    }

    /// Append every line of `text`, keeping its relative indentation
    pub fn push_text(&mut self, text: &str) {
        self.body.extend(text.lines().map(str::to_string));
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }
}

fn write_indented(f: &mut fmt::Formatter<'_>, line: &str, depth: usize) -> fmt::Result {
    if line.trim().is_empty() {
        writeln!(f)
    } else {
        writeln!(f, "{}{}", INDENT.repeat(depth), line)
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package {};", self.package)?;
        writeln!(f)?;
        if !self.imports.is_empty() {
            for import in &self.imports {
                writeln!(f, "import {};", import)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.class)
    }
}

impl fmt::Display for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "public class {}", self.name)?;
        if let Some(parent) = &self.extends {
            write!(f, " extends {}", parent)?;
        }
        if !self.implements.is_empty() {
            write!(f, " implements {}", self.implements.join(", "))?;
        }
        writeln!(f, " {{")?;

        for member in &self.members {
            writeln!(f)?;
            match member {
                Member::Method(method) => {
                    for annotation in &method.annotations {
                        write_indented(f, annotation, 1)?;
                    }
                    write_indented(f, &format!("{} {{", method.signature), 1)?;
                    for line in &method.body {
                        write_indented(f, line, 2)?;
                    }
                    write_indented(f, "}", 1)?;
                }
                Member::Block(text) => {
                    for line in text.trim_end().lines() {
                        write_indented(f, line, 1)?;
                    }
                }
            }
        }

        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_class() {
        let mut method = Method::new("public void greet(String name)").annotated("@Override");
        method.push_line("if (name != null) {");
        method.push_line("    say(name);");
        method.push_line("}");

        let mut class = JavaClass::new("Greeter");
        class.extends = Some("Base".to_string());
        class.implements = vec!["Listener".to_string(), "Runnable".to_string()];
        class.members.push(Member::Method(method));
        class.members.push(Member::Block("private int x;\n\nprivate int y;\n".to_string()));

        let mut file = JavaFile::new("dev.example", class);
        file.import(["java.util.List", "java.util.ArrayList", "java.util.List"]);

        let expected = "\
package dev.example;

import java.util.ArrayList;
import java.util.List;

public class Greeter extends Base implements Listener, Runnable {

    @Override
    public void greet(String name) {
        if (name != null) {
            say(name);
        }
    }

    private int x;

    private int y;
}
";
        assert_eq!(file.render(), expected);
        assert_eq!(file.relative_path(), "dev/example/Greeter.java");
    }

    #[test]
    fn test_render_without_imports_or_members() {
        let file = JavaFile::new("a.b", JavaClass::new("Empty"));
        assert_eq!(file.render(), "package a.b;\n\npublic class Empty {\n}\n");
    }
}
