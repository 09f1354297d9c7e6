//! Staff roster - pizza makers and couriers
//!
//! Makers and couriers share one `Employee` shape and differ only in the
//! work action performed during fulfillment, so they are one type with a
//! `Role` tag kept in two disjoint lists (no polymorphic dispatch).

/// Which list an employee belongs to, and which fulfillment step they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Maker,
    Courier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Maker => "maker",
            Role::Courier => "courier",
        }
    }
}

/// One staff member. `available` is true whenever no drain round is in
/// progress; during a round it goes false when they take an order and is
/// restored when the round ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub name: String,
    pub available: bool,
}

impl Employee {
    /// New hires start available.
    pub fn new(name: impl Into<String>) -> Self {
        Employee {
            name: name.into(),
            available: true,
        }
    }
}

/// Two independent staff lists, first-available-by-list-order selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    makers: Vec<Employee>,
    couriers: Vec<Employee>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    fn list_mut(&mut self, role: Role) -> &mut Vec<Employee> {
        match role {
            Role::Maker => &mut self.makers,
            Role::Courier => &mut self.couriers,
        }
    }

    pub fn list(&self, role: Role) -> &[Employee] {
        match role {
            Role::Maker => &self.makers,
            Role::Courier => &self.couriers,
        }
    }

    pub fn add(&mut self, role: Role, name: impl Into<String>) {
        self.list_mut(role).push(Employee::new(name));
    }

    /// Remove the first employee in the given list with this exact name.
    /// Returns whether a removal occurred.
    pub fn remove(&mut self, role: Role, name: &str) -> bool {
        let list = self.list_mut(role);
        match list.iter().position(|e| e.name == name) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Index of the first available employee in the given list.
    pub fn first_available(&self, role: Role) -> Option<usize> {
        self.list(role).iter().position(|e| e.available)
    }

    pub fn get_mut(&mut self, role: Role, idx: usize) -> Option<&mut Employee> {
        self.list_mut(role).get_mut(idx)
    }

    /// Flip everyone back to available (a drain round has ended).
    pub(crate) fn restore_all_available(&mut self) {
        for e in self.makers.iter_mut().chain(self.couriers.iter_mut()) {
            e.available = true;
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn verify_all_available(&self) {
        // Invariant: outside a drain round, every employee is available.
        debug_assert!(
            self.makers.iter().chain(self.couriers.iter()).all(|e| e.available),
            "Invariant violated: all staff must be available between drain rounds"
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub(crate) fn verify_all_available(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hires_start_available() {
        let mut roster = Roster::new();
        roster.add(Role::Maker, "Mario");
        assert!(roster.list(Role::Maker)[0].available);
    }

    #[test]
    fn test_lists_are_disjoint() {
        let mut roster = Roster::new();
        roster.add(Role::Maker, "Mario");
        roster.add(Role::Courier, "Luigi");

        assert!(!roster.remove(Role::Courier, "Mario"));
        assert!(roster.remove(Role::Maker, "Mario"));
        assert_eq!(roster.list(Role::Courier).len(), 1);
    }

    #[test]
    fn test_first_available_is_list_order() {
        let mut roster = Roster::new();
        roster.add(Role::Maker, "Mario");
        roster.add(Role::Maker, "Giovanni");

        assert_eq!(roster.first_available(Role::Maker), Some(0));

        roster.get_mut(Role::Maker, 0).unwrap().available = false;
        assert_eq!(roster.first_available(Role::Maker), Some(1));
    }

    #[test]
    fn test_remove_by_exact_name() {
        let mut roster = Roster::new();
        roster.add(Role::Courier, "Luigi");
        assert!(!roster.remove(Role::Courier, "luigi"));
        assert!(roster.remove(Role::Courier, "Luigi"));
        assert!(!roster.remove(Role::Courier, "Luigi"));
    }
}
