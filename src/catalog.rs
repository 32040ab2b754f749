//! Product to department lookups.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::LayoutError;


#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub items: Vec<String>,
}


/// Departments of the store and the products they stock
/// Departments keep the order they were declared in, a product stocked by
/// several departments belongs to the first one
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    departments: FxIndexMap<String, Department>,
}

impl Catalog {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, department: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments.insert(department.into(), Department {
            items: items.into_iter().map(Into::into).collect(),
        });
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.departments.keys().map(String::as_str)
    }

    /// Department stocking the product
    pub fn department_of(&self, product: &str) -> Option<&str> {
        self.departments
            .iter()
            .find(|(_, department)| department.items.iter().any(|item| item == product))
            .map(|(name, _)| name.as_str())
    }

    pub fn product_exists(&self, product: &str) -> bool {
        self.department_of(product).is_some()
    }

    /// Departments to visit for a shopping list
    /// Each department appears once, in the order of its first product on the list
    pub fn departments_for_products<S: AsRef<str>>(&self, products: &[S]) -> Result<Vec<String>, LayoutError> {
        let mut departments: FxIndexSet<&str> = FxIndexSet::default();
        for product in products {
            let product = product.as_ref();
            let department = self.department_of(product)
                .ok_or_else(|| LayoutError::UnknownProduct(product.to_string()))?;
            departments.insert(department);
        }

        debug!(products = products.len(), departments = departments.len(), "resolved shopping list");
        Ok(departments.into_iter().map(str::to_string).collect())
    }

    /// Products from a shopping list that the department stocks, in list order
    pub fn department_items<S: AsRef<str>>(&self, department: &str, products: &[S]) -> Result<Vec<String>, LayoutError> {
        let stocked = &self.departments
            .get(department)
            .ok_or_else(|| LayoutError::UnknownDepartment(department.to_string()))?
            .items;

        Ok(products
            .iter()
            .map(|product| product.as_ref())
            .filter(|product| stocked.iter().any(|item| item == *product))
            .map(str::to_string)
            .collect())
    }
}
