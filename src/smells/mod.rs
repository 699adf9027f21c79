//! Smell analyzers

pub mod assertions;
pub mod callmodel;
pub mod classify;

pub mod assertion_roulette;
pub mod conditional_logic;
pub mod default_test;
pub mod duplicate_assert;
pub mod eager_test;
pub mod exception_handling;
pub mod general_fixture;
pub mod magic_number;
pub mod magic_string;
pub mod mystery_guest;
pub mod print_statement;
pub mod redundant_assertion;
pub mod resource_optimism;
pub mod sensitive_equality;
pub mod sleepy_test;
pub mod verbose_test;

pub use assertion_roulette::AssertionRoulette;
pub use conditional_logic::ConditionalTestLogic;
pub use default_test::DefaultTest;
pub use dependent_test::DependentTest;
pub use duplicate_assert::DuplicateAssert;
pub use eager_test::EagerTest;
pub use empty_test::EmptyTest;
pub use exception_handling::ExceptionHandling;
pub use general_fixture::GeneralFixture;
pub use ignored_test::IgnoredTest;
pub use magic_number::MagicNumber;
pub use magic_string::MagicString;
pub use mystery_guest::MysteryGuest;
pub use print_statement::PrintStatement;
pub use redundant_assertion::RedundantAssertion;
pub use resource_optimism::ResourceOptimism;
pub use sensitive_equality::SensitiveEquality;
pub use sleepy_test::SleepyTest;
pub use unknown_test::UnknownTest;
pub use verbose_test::VerboseTest;

use thiserror::Error;

use crate::config::Thresholds;
use crate::syntax::CompilationUnit;
use crate::SmellResult;

/// Per-analyzer failure. Recoverable by the orchestrator; a missing
/// production file skips only the analyzer that needed it.
#[derive(Debug, Error)]
pub enum SmellError {
    #[error("{smell} requires a production file")]
    MissingProductionFile { smell: &'static str },
}

/// Contract shared by every analyzer in the catalog.
///
/// `analyze` accumulates into the analyzer's own result and must not
/// touch state visible to other analyzer instances. Instances are
/// built fresh per file by the orchestrator.
pub trait SmellAnalyzer {
    /// Stable display name of the smell
    fn name(&self) -> &'static str;

    /// Run the detection algorithm over one test file
    fn analyze(
        &mut self,
        test_unit: &CompilationUnit,
        production_unit: Option<&CompilationUnit>,
        test_name: &str,
        production_name: Option<&str>,
    ) -> Result<(), SmellError>;

    /// Accumulated outcome
    fn result(&self) -> &SmellResult;
}

/// Build a fresh analyzer catalog. Called once per analyzed file so no
/// analyzer state survives across files.
pub fn catalog(thresholds: &Thresholds) -> Vec<Box<dyn SmellAnalyzer>> {
    vec![
        Box::new(AssertionRoulette::new(thresholds.assertion_roulette)),
        Box::new(ConditionalTestLogic::new(thresholds.conditional_test_logic)),
        Box::new(DefaultTest::new()),
        Box::new(DependentTest::new()),
        Box::new(DuplicateAssert::new(thresholds.duplicate_assert)),
        Box::new(EagerTest::new()),
        Box::new(EmptyTest::new()),
        Box::new(ExceptionHandling::new(thresholds.exception_handling)),
        Box::new(GeneralFixture::new()),
        Box::new(IgnoredTest::new()),
        Box::new(MagicNumber::new(thresholds.magic_number)),
        Box::new(MagicString::new(thresholds.magic_string)),
        Box::new(MysteryGuest::new(thresholds.mystery_guest)),
        Box::new(PrintStatement::new(thresholds.print_statement)),
        Box::new(RedundantAssertion::new()),
        Box::new(ResourceOptimism::new(thresholds.resource_optimism)),
        Box::new(SensitiveEquality::new(thresholds.sensitive_equality)),
        Box::new(SleepyTest::new(thresholds.sleepy_test)),
        Box::new(UnknownTest::new()),
        Box::new(VerboseTest::new(thresholds.verbose_test)),
    ]
}

/// Display names in catalog order.
pub fn smell_names() -> Vec<&'static str> {
    catalog(&Thresholds::default())
        .iter()
        .map(|a| a.name())
        .collect()
}
