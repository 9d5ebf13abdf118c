use serde::Serialize;

/// Salary components for one employee (1:1 with users).
/// All amounts are f64 mirroring the REAL columns; nothing derived is
/// stored — gross/deductions/net are always computed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryInfo {
    pub id: i64,
    pub employee_id: i64,
    pub basic_salary: f64,
    pub hra: f64,
    pub standard_allowance: f64,
    pub performance_bonus: f64,
    pub lta: f64,
    pub fixed_allowance: f64,
    pub pf_employee: f64,      // employee-side PF, deducted from pay
    pub pf_employer: f64,      // employer-side PF, never part of net
    pub professional_tax: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl SalaryInfo {
    /// Zeroed components for an employee with no salary configured yet.
    pub fn default_for(employee_id: i64) -> Self {
        let now = chrono::Local::now().to_rfc3339();
        Self {
            id: 0,
            employee_id,
            basic_salary: 0.0,
            hra: 0.0,
            standard_allowance: 0.0,
            performance_bonus: 0.0,
            lta: 0.0,
            fixed_allowance: 0.0,
            pf_employee: 0.0,
            pf_employer: 0.0,
            professional_tax: 0.0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Sum of all earning components.
    pub fn gross(&self) -> f64 {
        self.basic_salary
            + self.hra
            + self.standard_allowance
            + self.performance_bonus
            + self.lta
            + self.fixed_allowance
    }

    /// Employee-side deductions only. pf_employer is an employer cost and
    /// is excluded.
    pub fn deductions(&self) -> f64 {
        self.pf_employee + self.professional_tax
    }

    pub fn net(&self) -> f64 {
        self.gross() - self.deductions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_is_gross_minus_deductions() {
        let mut s = SalaryInfo::default_for(1);
        s.basic_salary = 50_000.0;
        s.hra = 20_000.0;
        s.standard_allowance = 4_000.0;
        s.performance_bonus = 5_000.0;
        s.lta = 2_500.0;
        s.fixed_allowance = 1_500.0;
        s.pf_employee = 1_800.0;
        s.professional_tax = 200.0;

        assert_eq!(s.gross(), 83_000.0);
        assert_eq!(s.deductions(), 2_000.0);
        assert_eq!(s.net(), s.gross() - s.deductions());
    }

    #[test]
    fn employer_pf_never_changes_net() {
        let mut s = SalaryInfo::default_for(1);
        s.basic_salary = 30_000.0;
        s.pf_employee = 1_800.0;

        let before = s.net();
        s.pf_employer = 99_999.0;
        assert_eq!(s.net(), before);
    }
}
