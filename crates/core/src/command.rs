//! Forked-JVM command construction
//!
//! [`JavaCommand`] assembles the classpath and argument vector for one
//! external compiler invocation; [`CommandSpec`] is the immutable result
//! handed to the process runner. The builder never executes anything.

use std::path::PathBuf;
use std::time::Duration;

const CLASSPATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// A fully assembled external process invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Render the invocation for logs, quoting arguments with spaces.
    pub fn to_command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push_str(&format!("'{arg}'"));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Builder for a `java` invocation of a compiler main class.
///
/// Classpath entries are kept in insertion order; duplicates are permitted
/// because the first occurrence controls resolution anyway.
#[derive(Debug, Clone)]
pub struct JavaCommand {
    java: String,
    jvm_args: Vec<String>,
    system_properties: Vec<(String, String)>,
    classpath: Vec<PathBuf>,
    main_class: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl JavaCommand {
    pub fn new(main_class: impl Into<String>) -> Self {
        Self {
            java: "java".to_string(),
            jvm_args: Vec::new(),
            system_properties: Vec::new(),
            classpath: Vec::new(),
            main_class: main_class.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Override the JVM executable (path to `java`).
    pub fn jvm(mut self, java: impl Into<String>) -> Self {
        self.java = java.into();
        self
    }

    pub fn jvm_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jvm_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn system_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_properties.push((key.into(), value.into()));
        self
    }

    pub fn add_to_classpath(mut self, entry: impl Into<PathBuf>) -> Self {
        self.classpath.push(entry.into());
        self
    }

    pub fn add_all_to_classpath<I, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.classpath.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add a flag token only when the condition holds. Used both for plain
    /// boolean options and for negative flags that default to enabled.
    pub fn arg_if(self, condition: bool, flag: &str) -> Self {
        if condition { self.arg(flag) } else { self }
    }

    /// Add a `-name value` option pair.
    pub fn arg_pair(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> CommandSpec {
        let mut args = self.jvm_args;
        for (key, value) in self.system_properties {
            args.push(format!("-D{key}={value}"));
        }
        if !self.classpath.is_empty() {
            args.push("-cp".to_string());
            args.push(
                self.classpath
                    .iter()
                    .map(|entry| entry.display().to_string())
                    .collect::<Vec<_>>()
                    .join(&CLASSPATH_SEPARATOR.to_string()),
            );
        }
        args.push(self.main_class);
        args.extend(self.args);

        CommandSpec {
            program: self.java,
            args,
            working_dir: self.working_dir,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_args_in_order() {
        let spec = JavaCommand::new("com.google.gwt.dev.Compiler")
            .jvm_args(["-Xmx1G"])
            .system_property("gwt.persistentunitcache", "false")
            .add_to_classpath("src/main/java")
            .add_to_classpath("lib/gwt-user.jar")
            .arg_pair("-logLevel", "INFO")
            .arg_if(true, "-draftCompile")
            .arg_if(false, "-validateOnly")
            .arg("com.example.MyWidgetset")
            .build();

        assert_eq!(spec.program, "java");
        let sep = if cfg!(windows) { ';' } else { ':' };
        assert_eq!(
            spec.args,
            vec![
                "-Xmx1G".to_string(),
                "-Dgwt.persistentunitcache=false".to_string(),
                "-cp".to_string(),
                format!("src/main/java{sep}lib/gwt-user.jar"),
                "com.google.gwt.dev.Compiler".to_string(),
                "-logLevel".to_string(),
                "INFO".to_string(),
                "-draftCompile".to_string(),
                "com.example.MyWidgetset".to_string(),
            ]
        );
    }

    #[test]
    fn classpath_omitted_when_empty() {
        let spec = JavaCommand::new("com.vaadin.sass.SassCompiler").build();
        assert_eq!(spec.args, vec!["com.vaadin.sass.SassCompiler".to_string()]);
    }

    #[test]
    fn duplicate_classpath_entries_are_preserved() {
        let spec = JavaCommand::new("Main")
            .add_all_to_classpath(["a.jar", "b.jar", "a.jar"])
            .build();
        let sep = if cfg!(windows) { ";" } else { ":" };
        assert_eq!(spec.args[1], format!("a.jar{sep}b.jar{sep}a.jar"));
    }

    #[test]
    fn command_line_quotes_spaced_arguments() {
        let spec = JavaCommand::new("Main").arg("two words").build();
        assert_eq!(spec.to_command_line(), "java Main 'two words'");
    }
}
