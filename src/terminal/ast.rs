use std::fmt;

/// Every program name the terminal knows about. Only a subset is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    Ls,
    Cd,
    Mkdir,
    Rm,
    Rmdir,
    Cp,
    Mv,
    Cat,
    Echo,
    Touch,
    Pwd,
}

impl Program {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ls" => Some(Program::Ls),
            "cd" => Some(Program::Cd),
            "mkdir" => Some(Program::Mkdir),
            "rm" => Some(Program::Rm),
            "rmdir" => Some(Program::Rmdir),
            "cp" => Some(Program::Cp),
            "mv" => Some(Program::Mv),
            "cat" => Some(Program::Cat),
            "echo" => Some(Program::Echo),
            "touch" => Some(Program::Touch),
            "pwd" => Some(Program::Pwd),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Program::Ls => "ls",
            Program::Cd => "cd",
            Program::Mkdir => "mkdir",
            Program::Rm => "rm",
            Program::Rmdir => "rmdir",
            Program::Cp => "cp",
            Program::Mv => "mv",
            Program::Cat => "cat",
            Program::Echo => "echo",
            Program::Touch => "touch",
            Program::Pwd => "pwd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandName {
    Known(Program),
    Unknown(String),
}

impl CommandName {
    pub fn parse(name: &str) -> Self {
        match Program::from_name(name) {
            Some(p) => CommandName::Known(p),
            None => CommandName::Unknown(name.to_string()),
        }
    }

    /// The name as handed to the OS. Known programs use their canonical spelling.
    pub fn as_str(&self) -> &str {
        match self {
            CommandName::Known(p) => p.as_str(),
            CommandName::Unknown(s) => s,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentNode {
    pub text: String,
}

// Root of a parsed line: a program and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    pub name: CommandName,
    pub arguments: Vec<ArgumentNode>,
}

impl CommandNode {
    pub fn new(name: CommandName) -> Self {
        Self { name, arguments: Vec::new() }
    }

    #[cfg(test)]
    pub fn with_args<I, S>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: CommandName::parse(name),
            arguments: args.into_iter().map(|a| ArgumentNode { text: a.into() }).collect(),
        }
    }

    pub fn push_arg(&mut self, text: &str) {
        self.arguments.push(ArgumentNode { text: text.to_string() });
    }

    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|a| a.text.as_str())
    }

    /// `[name] ++ arguments`, in order.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.arguments.len() + 1);
        argv.push(self.name.as_str().to_string());
        argv.extend(self.args().map(str::to_string));
        argv
    }
}
