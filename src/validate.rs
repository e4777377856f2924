//! Program-level checks that run after a successful parse.
//!
//! A runnable program has exactly one `Program` struct whose `Main` handler
//! takes the single parameter `system`. Names must also be unique within
//! their scope: struct names in the program, member and handler names in a
//! struct.

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Program, StructDeclaration};
use crate::lexer::Location;

pub const ENTRY_STRUCT: &str = "Program";
pub const ENTRY_HANDLER: &str = "Main";
pub const ENTRY_PARAMETER: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{location}: program must declare a struct named 'Program'")]
    MissingProgram { location: Location },

    #[error("{location}: struct 'Program' must declare a handler 'Main'")]
    MissingMain { location: Location },

    #[error(
        "{location}: handler 'Main' must take exactly one parameter 'system', found {found}"
    )]
    InvalidMainParameters { found: String, location: Location },

    #[error("{location}: struct '{name}' is already declared at {previous}")]
    DuplicateStruct {
        name: String,
        previous: Location,
        location: Location,
    },

    #[error("{location}: member '{name}' of struct '{owner}' is already declared at {previous}")]
    DuplicateMember {
        owner: String,
        name: String,
        previous: Location,
        location: Location,
    },

    #[error("{location}: handler '{name}' of struct '{owner}' is already declared at {previous}")]
    DuplicateHandler {
        owner: String,
        name: String,
        previous: Location,
        location: Location,
    },
}

impl ValidationError {
    pub fn location(&self) -> &Location {
        match self {
            ValidationError::MissingProgram { location }
            | ValidationError::MissingMain { location }
            | ValidationError::InvalidMainParameters { location, .. }
            | ValidationError::DuplicateStruct { location, .. }
            | ValidationError::DuplicateMember { location, .. }
            | ValidationError::DuplicateHandler { location, .. } => location,
        }
    }
}

/// Run every check and report all violations in source order of discovery.
pub fn validate_entry(program: &Program) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_unique_structs(program, &mut errors);
    for declaration in &program.struct_declarations {
        check_unique_items(declaration, &mut errors);
    }
    check_entry_point(program, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique_structs(program: &Program, errors: &mut Vec<ValidationError>) {
    let mut seen: HashMap<&str, &Location> = HashMap::new();
    for declaration in &program.struct_declarations {
        if let Some(previous) = seen.get(declaration.name.as_str()) {
            errors.push(ValidationError::DuplicateStruct {
                name: declaration.name.clone(),
                previous: (*previous).clone(),
                location: declaration.location.clone(),
            });
        } else {
            seen.insert(&declaration.name, &declaration.location);
        }
    }
}

fn check_unique_items(declaration: &StructDeclaration, errors: &mut Vec<ValidationError>) {
    let mut members: HashMap<&str, &Location> = HashMap::new();
    for member in &declaration.member_declarations {
        if let Some(previous) = members.get(member.name.as_str()) {
            errors.push(ValidationError::DuplicateMember {
                owner: declaration.name.clone(),
                name: member.name.clone(),
                previous: (*previous).clone(),
                location: member.location.clone(),
            });
        } else {
            members.insert(&member.name, &member.location);
        }
    }

    let mut handlers: HashMap<&str, &Location> = HashMap::new();
    for handler in &declaration.message_handler_declarations {
        if let Some(previous) = handlers.get(handler.name.as_str()) {
            errors.push(ValidationError::DuplicateHandler {
                owner: declaration.name.clone(),
                name: handler.name.clone(),
                previous: (*previous).clone(),
                location: handler.location.clone(),
            });
        } else {
            handlers.insert(&handler.name, &handler.location);
        }
    }
}

fn check_entry_point(program: &Program, errors: &mut Vec<ValidationError>) {
    // duplicates of `Program` are reported by the uniqueness check
    let Some(entry) = program.find_struct(ENTRY_STRUCT) else {
        errors.push(ValidationError::MissingProgram {
            location: program.location.clone(),
        });
        return;
    };

    let Some(main) = entry.find_handler(ENTRY_HANDLER) else {
        errors.push(ValidationError::MissingMain {
            location: entry.location.clone(),
        });
        return;
    };

    match main.parameters.as_slice() {
        [parameter] if parameter.name == ENTRY_PARAMETER => {}
        parameters => {
            let found = if parameters.is_empty() {
                "none".to_string()
            } else {
                parameters
                    .iter()
                    .map(|p| format!("'{}'", p.name))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            errors.push(ValidationError::InvalidMainParameters {
                found,
                location: main.location.clone(),
            });
        }
    }
}
