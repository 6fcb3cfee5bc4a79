//! The flat document model a knowledge base serialises to.

use crate::base::{Hyperedges, Uid};
use crate::interchange::InterchangeError;
use crate::kb::KnowledgeBase;
use serde::{Deserialize, Serialize};

/// A concept with its lattice memberships.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub id: String,
    pub label: String,
    /// Direct *is-a* parents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supers: Vec<String>,
    /// Direct *instance-of* classes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

/// A relation type with its schema and subsumption parents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codomain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supers: Vec<String>,
}

/// A fact: one relation type, two endpoint sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    pub relation: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

/// The serialisable form of a whole knowledge base.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub concepts: Vec<ConceptRecord>,
    pub relations: Vec<RelationRecord>,
    pub facts: Vec<FactRecord>,
}

impl Document {
    /// Capture a knowledge base. Record order follows creation/assertion
    /// order, so capturing the same base twice yields identical documents.
    pub fn from_network(kb: &KnowledgeBase) -> Self {
        let concepts = kb
            .concepts()
            .map(|(uid, concept)| ConceptRecord {
                id: uid.to_string(),
                label: concept.label.to_string(),
                supers: id_list(&kb.direct_superclasses(uid)),
                classes: id_list(&kb.direct_classes(uid)),
            })
            .collect();
        let relations = kb
            .relation_types()
            .map(|(uid, relation)| RelationRecord {
                id: uid.to_string(),
                label: relation.label.to_string(),
                domain: id_list(&relation.domain),
                codomain: id_list(&relation.codomain),
                supers: id_list(&kb.relation_parents(uid)),
            })
            .collect();
        let facts = kb
            .facts()
            .map(|fact| FactRecord {
                relation: fact.relation.to_string(),
                sources: id_list(&fact.sources),
                targets: id_list(&fact.targets),
            })
            .collect();
        Self {
            concepts,
            relations,
            facts,
        }
    }

    /// Rebuild a knowledge base from this document.
    ///
    /// Every referenced identifier must be defined by the document itself;
    /// a dangling reference or a fact that fails its relation's schema check
    /// is an error, never a silent drop.
    pub fn into_network(self) -> Result<KnowledgeBase, InterchangeError> {
        let mut kb = KnowledgeBase::new();
        // Entities first, lattice edges second, facts last: facts validate
        // against the completed lattice.
        for record in &self.concepts {
            kb.create_concept(Uid::from(record.id.as_str()), &record.label);
        }
        for record in &self.relations {
            let domain = uid_set(&kb, &record.domain)?;
            let codomain = uid_set(&kb, &record.codomain)?;
            kb.create_relation(Uid::from(record.id.as_str()), &record.label, domain, codomain);
        }
        for record in &self.concepts {
            let child = Hyperedges::one(Uid::from(record.id.as_str()));
            let supers = uid_set(&kb, &record.supers)?;
            if !supers.is_empty() {
                kb.assert_is_a(&child, &supers);
            }
            let classes = uid_set(&kb, &record.classes)?;
            if !classes.is_empty() {
                kb.assert_instance_of(&child, &classes);
            }
        }
        for record in &self.relations {
            let child = Uid::from(record.id.as_str());
            for parent in &record.supers {
                if !kb.assert_subrelation(&child, &Uid::from(parent.as_str())) {
                    return Err(InterchangeError::UnresolvedReference(parent.clone()));
                }
            }
        }
        for record in &self.facts {
            let relation = Uid::from(record.relation.as_str());
            if kb.relation(&relation).is_none() {
                return Err(InterchangeError::UnresolvedReference(record.relation.clone()));
            }
            let sources = uid_set(&kb, &record.sources)?;
            let targets = uid_set(&kb, &record.targets)?;
            if kb.assert_fact(&sources, &targets, &relation).is_empty() {
                return Err(InterchangeError::Validation(format!(
                    "fact of {relation} rejected by its schema"
                )));
            }
        }
        Ok(kb)
    }
}

fn id_list(uids: &Hyperedges) -> Vec<String> {
    uids.iter().map(|uid| uid.to_string()).collect()
}

fn uid_set(kb: &KnowledgeBase, ids: &[String]) -> Result<Hyperedges, InterchangeError> {
    let mut result = Hyperedges::new();
    for id in ids {
        let uid = Uid::from(id.as_str());
        if !kb.contains(&uid) {
            return Err(InterchangeError::UnresolvedReference(id.clone()));
        }
        result.insert(uid);
    }
    Ok(result)
}
