//! スキャン前に表示する固定の書籍リスト

use crate::types::StaticBookRecord;

/// 固定リスト（プロセス全体で不変）
pub static FALLBACK_BOOKS: [StaticBookRecord; 5] = [
    StaticBookRecord {
        title: "Things Fall Apart",
        author: "Chinua Achebe",
        summary: "A classic novel about the clash between Nigerian traditions and European colonialism through the life of Okonkwo.",
    },
    StaticBookRecord {
        title: "Purple Hibiscus",
        author: "Chimamanda Ngozi Adichie",
        summary: "A powerful story about religion, family, and coming of age in post-colonial Nigeria.",
    },
    StaticBookRecord {
        title: "My Life in the Bush of Ghosts",
        author: "Amos Tutuola",
        summary: "A young boy's journey through a fantastical world of spirits and monsters in Nigerian folklore.",
    },
    StaticBookRecord {
        title: "The Secret Lives of Baba Segi's Wives",
        author: "Lola Shoneyin",
        summary: "A humorous yet poignant tale about polygamy and family secrets in modern Nigeria.",
    },
    StaticBookRecord {
        title: "The Famished Road",
        author: "Ben Okri",
        summary: "A magical realist novel following Azaro, a spirit child navigating between the world of the living and spirits.",
    },
];
