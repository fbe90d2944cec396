use std::sync::Arc;

use crate::harvest::helper::{enumerate_fields, sanitize_fields};
use crate::model::{AccessFilter, SanitizedField};
use crate::traits::{FieldHarvester, TypeIntrospector};

/// Harvests every public and non-public instance field, base types first.
///
/// Handles every type; non-harvestable types simply report no fields.
pub struct AllFieldsHarvester<I: TypeIntrospector> {
    introspector: Arc<I>,
}

impl<I: TypeIntrospector> AllFieldsHarvester<I> {
    pub fn new(introspector: Arc<I>) -> Self {
        Self { introspector }
    }
}

impl<I: TypeIntrospector + Send + Sync> FieldHarvester for AllFieldsHarvester<I> {
    type Type = I::Type;

    fn can_handle(&self, _ty: &I::Type) -> bool {
        true
    }

    fn harvest(&self, ty: &I::Type) -> Vec<SanitizedField> {
        sanitize_fields(enumerate_fields(
            self.introspector.as_ref(),
            Some(ty),
            AccessFilter::DEFAULT,
        ))
    }
}

/// Harvests public instance fields only.
pub struct PublicFieldsHarvester<I: TypeIntrospector> {
    introspector: Arc<I>,
}

impl<I: TypeIntrospector> PublicFieldsHarvester<I> {
    pub fn new(introspector: Arc<I>) -> Self {
        Self { introspector }
    }
}

impl<I: TypeIntrospector + Send + Sync> FieldHarvester for PublicFieldsHarvester<I> {
    type Type = I::Type;

    fn can_handle(&self, _ty: &I::Type) -> bool {
        true
    }

    fn harvest(&self, ty: &I::Type) -> Vec<SanitizedField> {
        sanitize_fields(enumerate_fields(
            self.introspector.as_ref(),
            Some(ty),
            AccessFilter::PUBLIC,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldDef, TypeDef, TypeHandle, TypeTable};

    fn table() -> Arc<TypeTable> {
        Arc::new(
            TypeTable::from_defs(vec![
                TypeDef::new("MyApp.Person")
                    .field(FieldDef::new("<Age>k__BackingField", "System.Int32"))
                    .field(FieldDef::new("Name", "System.String").public()),
                TypeDef::new("MyApp.Employee")
                    .extends("MyApp.Person")
                    .field(FieldDef::new("salary", "System.Decimal")),
                TypeDef::new("System.Func`1").field(FieldDef::new("_target", "System.Object")),
            ])
            .unwrap(),
        )
    }

    fn display(fields: &[SanitizedField]) -> Vec<&str> {
        fields.iter().map(|f| f.sanitized_name.as_str()).collect()
    }

    #[test]
    fn test_all_fields_harvester() {
        let table = table();
        let employee = table.lookup("MyApp.Employee").unwrap();
        let harvester = AllFieldsHarvester::new(Arc::clone(&table));

        assert!(harvester.can_handle(&employee));
        let fields = harvester.harvest(&employee);
        assert_eq!(display(&fields), vec!["Age", "Name", "salary"]);
        assert_eq!(fields[0].field.name, "<Age>k__BackingField");
    }

    #[test]
    fn test_public_fields_harvester() {
        let table = table();
        let employee = table.lookup("MyApp.Employee").unwrap();
        let harvester = PublicFieldsHarvester::new(Arc::clone(&table));

        assert_eq!(display(&harvester.harvest(&employee)), vec!["Name"]);
    }

    #[test]
    fn test_harvesters_share_a_strategy_list_across_threads() {
        let table = table();
        let person = table.lookup("MyApp.Person").unwrap();
        let harvesters: Arc<Vec<Box<dyn FieldHarvester<Type = TypeHandle>>>> = Arc::new(vec![
            Box::new(PublicFieldsHarvester::new(Arc::clone(&table))),
            Box::new(AllFieldsHarvester::new(Arc::clone(&table))),
        ]);

        let worker = {
            let harvesters = Arc::clone(&harvesters);
            std::thread::spawn(move || {
                harvesters
                    .iter()
                    .find(|h| h.can_handle(&person))
                    .map(|h| h.harvest(&person))
                    .unwrap_or_default()
            })
        };

        let fields = worker.join().unwrap();
        assert_eq!(display(&fields), vec!["Name"]);
        assert_eq!(harvesters.len(), 2);
    }

    #[test]
    fn test_harvesters_report_nothing_for_framework_types() {
        let table = table();
        let func = table.lookup("System.Func`1").unwrap();

        let all = AllFieldsHarvester::new(Arc::clone(&table));
        let public = PublicFieldsHarvester::new(table);
        assert!(all.harvest(&func).is_empty());
        assert!(public.harvest(&func).is_empty());
    }
}
