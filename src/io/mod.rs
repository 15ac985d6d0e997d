/*!
# IO utilities

Saving accepted texts, reading them back, and the collection report.

On-disk layout (see [Layout]):

```text
dst/
├── download_report.json
└── <language>/
    ├── raw/<source>_<batch>.txt
    ├── processed/<language>_corpus.txt
    └── metadata/processing_stats.json
```
!*/
mod layout;
pub mod reader;
pub mod report;
pub mod writer;

pub use layout::Layout;
pub use reader::split_batch;
pub use report::Report;
pub use writer::{BatchWriter, Sink};

/// Written after each text of a batch file.
pub const SEPARATOR: &str = "\n==================================================\n";
