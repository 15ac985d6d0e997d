/*! Script identification

Holds the [ScriptClassifier] that labels texts by their writing system composition.
Admissibility of a label for a language lives in [crate::filtering::script]. !*/
pub mod script;

pub use script::ClassifierConfig;
pub use script::ScriptClassifier;
pub use script::ScriptLabel;
pub use script::ScriptProfile;
pub use script::ScriptThresholds;
