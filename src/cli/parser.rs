use clap::{Parser, Subcommand};

/// Command-line interface definition for dayflow
/// HR core on SQLite: employee records, attendance, leave and payroll
#[derive(Parser)]
#[command(
    name = "dayflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "HR management CLI: attendance tracking, leave workflow and payroll reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Acting caller's login id (the identity the command runs as)
    #[arg(global = true, long = "as")]
    pub acting: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Register a new employee (admin/hr; first ever registration needs no caller)
    Register {
        /// Company name (created with a derived code when unknown)
        #[arg(long)]
        company: String,

        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        /// Role: admin, hr or employee
        #[arg(long, default_value = "employee")]
        role: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        position: Option<String>,
    },

    /// Record today's check-in for the acting caller
    CheckIn {
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Record today's check-out and derive hours worked
    CheckOut {
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Resolved attendance status for a day (default: today)
    Status {
        /// Date to inspect (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Leave requests: apply, decide, list
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Salary components: set or show
    Salary {
        #[command(subcommand)]
        action: SalaryAction,
    },

    /// Company-wide payroll updates
    Payroll {
        #[command(subcommand)]
        action: PayrollAction,
    },

    /// Generate a report as an HTML view or a CSV file
    Report {
        /// Report type: attendance, payroll, leave or employee
        #[arg(long = "type")]
        report_type: String,

        /// Subtype, e.g. daily, weekly, monthly, custom, salary_slips,
        /// summary, balance, directory
        #[arg(long)]
        subtype: String,

        /// Custom date range START:END (YYYY-MM-DD each), custom subtype only
        #[arg(long)]
        range: Option<String>,

        /// Output format: view (HTML fragment to stdout) or csv
        #[arg(long, default_value = "view")]
        format: String,

        /// CSV output path (default: the report's own filename in the
        /// current directory)
        #[arg(long)]
        file: Option<String>,
    },

    /// Profile details, skills and certifications
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manager assignments
    Manager {
        #[command(subcommand)]
        action: ManagerAction,
    },

    /// Audit log of recorded operations
    Log {
        /// Print the audit log, newest first
        #[arg(long)]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// Submit a leave request for the acting caller
    Apply {
        /// Leave type: paid, sick or unpaid
        #[arg(long = "type")]
        leave_type: String,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Duration: full_day or half_day
        #[arg(long, default_value = "full_day")]
        duration: String,

        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Approve a pending request and back-fill attendance (admin/hr)
    Approve {
        id: i64,

        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Reject a pending request (admin/hr)
    Reject {
        id: i64,

        #[arg(long, default_value = "")]
        comments: String,
    },

    /// List leave requests (own, or the whole company for admin/hr)
    List,
}

#[derive(Subcommand)]
pub enum SalaryAction {
    /// Set all salary components for an employee (admin/hr)
    Set {
        /// Employee login id
        employee: String,

        #[arg(long, default_value_t = 0.0)]
        basic: f64,

        #[arg(long, default_value_t = 0.0)]
        hra: f64,

        #[arg(long = "standard-allowance", default_value_t = 0.0)]
        standard_allowance: f64,

        #[arg(long = "bonus", default_value_t = 0.0)]
        performance_bonus: f64,

        #[arg(long, default_value_t = 0.0)]
        lta: f64,

        #[arg(long = "fixed-allowance", default_value_t = 0.0)]
        fixed_allowance: f64,

        #[arg(long = "pf-employee", default_value_t = 0.0)]
        pf_employee: f64,

        #[arg(long = "pf-employer", default_value_t = 0.0)]
        pf_employer: f64,

        #[arg(long = "professional-tax", default_value_t = 0.0)]
        professional_tax: f64,
    },

    /// Show salary components and derived figures
    Show {
        /// Employee login id (default: the acting caller)
        employee: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PayrollAction {
    /// Percentage increment on basic salary across the company (admin/hr)
    Increment { percent: f64 },

    /// Flat bonus added to performance_bonus across the company (admin/hr)
    Bonus { amount: f64 },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show profile details, skills and certifications
    Show {
        /// Employee login id (default: the acting caller)
        employee: Option<String>,
    },

    /// Update private and bank details (only the given fields change)
    Update {
        /// Employee login id (default: the acting caller)
        #[arg(long)]
        employee: Option<String>,

        #[arg(long = "date-of-birth")]
        date_of_birth: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        nationality: Option<String>,

        #[arg(long = "personal-email")]
        personal_email: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long = "marital-status")]
        marital_status: Option<String>,

        #[arg(long = "account-number")]
        account_number: Option<String>,

        #[arg(long = "bank-name")]
        bank_name: Option<String>,

        #[arg(long = "ifsc-code")]
        ifsc_code: Option<String>,

        #[arg(long = "pan-number")]
        pan_number: Option<String>,

        #[arg(long = "uan-number")]
        uan_number: Option<String>,

        #[arg(long = "employee-code")]
        employee_code: Option<String>,
    },

    /// Add a skill
    AddSkill {
        name: String,

        /// Proficiency: Beginner, Intermediate, Advanced or Expert
        #[arg(long)]
        level: Option<String>,
    },

    /// Delete a skill by id
    DelSkill { id: i64 },

    /// Add a certification
    AddCert {
        name: String,

        #[arg(long)]
        org: Option<String>,

        /// Issue date (YYYY-MM-DD)
        #[arg(long)]
        issued: Option<String>,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<String>,

        #[arg(long)]
        credential: Option<String>,
    },

    /// Delete a certification by id
    DelCert { id: i64 },
}

#[derive(Subcommand)]
pub enum ManagerAction {
    /// Assign a manager to an employee (admin/hr)
    Assign {
        /// Employee login id
        employee: String,

        /// Manager login id
        manager: String,
    },
}
