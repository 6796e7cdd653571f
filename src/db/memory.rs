//! In-memory [`RecordStore`] used by the handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::RecordStore;
use crate::errors::AppError;
use crate::models::admin::AdminCredential;
use crate::models::employee::{Employee, NewEmployee};

#[derive(Default)]
pub struct MemoryStore {
    employees: Mutex<Vec<Employee>>,
    admins: Vec<AdminCredential>,
    next_id: AtomicUsize,
    queries: AtomicUsize,
}

impl MemoryStore {
    pub fn with_admin(username: &str, password_hash: &str) -> Self {
        Self {
            admins: vec![AdminCredential {
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            }],
            ..Self::default()
        }
    }

    /// Number of employee-table operations performed so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.employees.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<Employee> {
        let mut employees = self.employees.lock().unwrap().clone();
        employees.sort_by(|a, b| b.id.cmp(&a.id));
        employees
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<i64, AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        self.employees.lock().unwrap().push(Employee {
            id,
            name: employee.name.clone(),
            age: employee.age,
            department: employee.department.clone(),
            city: employee.city.clone(),
            works_url: employee.works_url.clone(),
            contact: employee.contact.clone(),
        });
        Ok(id)
    }

    async fn delete_employee(&self, id: i64) -> Result<(), AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.employees.lock().unwrap().retain(|employee| employee.id != id);
        Ok(())
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminCredential>, AppError> {
        Ok(self.admins.iter().find(|admin| admin.username == username).cloned())
    }
}
