//! Semantic model: resolves property names to the choices that provide
//! them, classifies each choice's kind, and catches the static errors that
//! only become visible once the whole spec has been parsed.

use crate::compiler::ast::SpecAst;
use genpairs_core::{CategoryName, ChoiceName, PropertyName, Span};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("property '{property}' required by '{choice}' (at {span}) has no provider")]
    UnknownProperty {
        property: String,
        choice: String,
        span: Span,
    },
    #[error("choice '{choice}' (at {span}) both declares and excludes property '{property}'")]
    SelfExclusion {
        choice: String,
        property: String,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    Normal,
    Single,
    Error,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub name: ChoiceName,
    pub span: Span,
    pub kind: ChoiceKind,
    pub properties: HashSet<PropertyName>,
    pub requires: Vec<PropertyName>,
    pub excludes: HashSet<PropertyName>,
}

impl Choice {
    pub fn is_normal(&self) -> bool {
        matches!(self.kind, ChoiceKind::Normal)
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: CategoryName,
    pub choices: Vec<Choice>,
}

impl Category {
    pub fn normal_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_normal())
            .map(|(i, _)| i)
    }
}

/// The immutable, fully resolved constraint graph over categories × choices.
/// Built once per invocation; never mutated afterward.
#[derive(Debug, Clone)]
pub struct Model {
    pub categories: Vec<Category>,
    providers: HashMap<PropertyName, Vec<(usize, usize)>>,
}

impl Model {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn choice(&self, cat: usize, choice: usize) -> &Choice {
        &self.categories[cat].choices[choice]
    }

    pub fn providers_of(&self, property: &PropertyName) -> &[(usize, usize)] {
        self.providers
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub fn build(ast: SpecAst) -> Result<Model, SemanticError> {
    let mut categories = Vec::with_capacity(ast.categories.len());
    for cat_ast in &ast.categories {
        let mut choices = Vec::with_capacity(cat_ast.choices.len());
        for choice_ast in &cat_ast.choices {
            let kind = if choice_ast.error {
                ChoiceKind::Error
            } else if choice_ast.single {
                ChoiceKind::Single
            } else {
                ChoiceKind::Normal
            };
            let properties: HashSet<PropertyName> = choice_ast
                .props
                .iter()
                .map(PropertyName::new)
                .collect();
            let excludes: HashSet<PropertyName> = choice_ast
                .excludes
                .iter()
                .map(PropertyName::new)
                .collect();
            for p in &excludes {
                if properties.contains(p) {
                    return Err(SemanticError::SelfExclusion {
                        choice: choice_ast.name.clone(),
                        property: p.as_str().to_string(),
                        span: choice_ast.span,
                    });
                }
            }
            let requires: Vec<PropertyName> = choice_ast
                .requires
                .iter()
                .map(PropertyName::new)
                .collect();
            choices.push(Choice {
                name: ChoiceName::new(&choice_ast.name),
                span: choice_ast.span,
                kind,
                properties,
                requires,
                excludes,
            });
        }
        categories.push(Category {
            name: CategoryName::new(&cat_ast.name),
            choices,
        });
    }

    let mut providers: HashMap<PropertyName, Vec<(usize, usize)>> = HashMap::new();
    for (cat_idx, category) in categories.iter().enumerate() {
        for (choice_idx, choice) in category.choices.iter().enumerate() {
            for prop in &choice.properties {
                providers
                    .entry(prop.clone())
                    .or_default()
                    .push((cat_idx, choice_idx));
            }
        }
    }

    for (cat_ast, category) in ast.categories.iter().zip(&categories) {
        for (choice_ast, choice) in cat_ast.choices.iter().zip(&category.choices) {
            for prop in &choice.requires {
                if providers.get(prop).map_or(true, |v| v.is_empty()) {
                    return Err(SemanticError::UnknownProperty {
                        property: prop.as_str().to_string(),
                        choice: choice_ast.name.clone(),
                        span: choice_ast.span,
                    });
                }
            }
        }
    }

    Ok(Model {
        categories,
        providers,
    })
}
