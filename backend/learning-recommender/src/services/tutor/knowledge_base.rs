use super::TopicAspect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Curated text for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub definition: String,
    pub concepts: String,
    pub examples: String,
    pub related: String,
    /// Longer notes on individual concepts, keyed like `linked_list`
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl KnowledgeEntry {
    fn new(topic: &str, definition: &str, concepts: &str, examples: &str, related: &str) -> Self {
        Self {
            topic: topic.to_string(),
            definition: definition.to_string(),
            concepts: concepts.to_string(),
            examples: examples.to_string(),
            related: related.to_string(),
            notes: BTreeMap::new(),
        }
    }

    fn with_note(mut self, key: &str, text: &str) -> Self {
        self.notes.insert(key.to_string(), text.to_string());
        self
    }

    pub fn aspect(&self, aspect: TopicAspect) -> &str {
        let text = match aspect {
            TopicAspect::Definition => self.definition.as_str(),
            TopicAspect::Concepts => self.concepts.as_str(),
            TopicAspect::Examples => self.examples.as_str(),
            TopicAspect::Related => self.related.as_str(),
        };
        if text.is_empty() {
            self.definition.as_str()
        } else {
            text
        }
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }
}

/// Topic knowledge in declaration order; lookups ignore case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, topic: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|entry| entry.topic.eq_ignore_ascii_case(topic.trim()))
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.topic.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The six core curriculum topics
    pub fn sample() -> Self {
        Self::new(vec![
            KnowledgeEntry::new(
                "Programming Basics",
                "The fundamental concepts and techniques of computer programming, including variables, control structures, functions, and basic algorithms.",
                "Variables, data types, operators, loops, conditionals, functions, and basic I/O operations.",
                "Writing a program to calculate factorial, creating a simple calculator, implementing a temperature converter.",
                "Data Structures, Algorithms, OOP",
            )
            .with_note(
                "loops",
                "Loops are control flow structures that allow code to be executed repeatedly. Common types include for loops, while loops, and do-while loops. Loops are essential for iterating through collections, processing data, and implementing algorithms.",
            ),
            KnowledgeEntry::new(
                "Data Structures",
                "Ways to organize and store data in computer memory for efficient access and modification.",
                "Arrays, linked lists, stacks, queues, trees, graphs, hash tables, and heaps.",
                "Implementing a linked list to manage a collection, using a stack to evaluate expressions, employing a hash table for fast lookups.",
                "Algorithms, Programming Basics, OOP",
            )
            .with_note(
                "array",
                "An array stores elements of the same type in contiguous memory locations. Elements are accessed by index in constant time. Arrays are fixed-size in most low-level languages, though dynamic arrays can grow automatically.",
            )
            .with_note(
                "linked_list",
                "A linked list is a linear data structure where each node points to the next node in the sequence. Nodes need not be contiguous in memory, which makes insertion and deletion cheap but requires O(n) traversal for access.",
            ),
            KnowledgeEntry::new(
                "Algorithms",
                "Step-by-step procedures or formulas for solving problems, particularly calculations and data processing tasks.",
                "Sorting algorithms, searching algorithms, graph algorithms, greedy algorithms, dynamic programming, and complexity analysis.",
                "Implementing quicksort to arrange elements, using binary search to find an item, applying Dijkstra's algorithm to find shortest paths.",
                "Data Structures, Operating Systems",
            ),
            KnowledgeEntry::new(
                "OOP",
                "Object-Oriented Programming is a programming paradigm based on the concept of 'objects' containing data and methods.",
                "Classes, objects, inheritance, polymorphism, encapsulation, and abstraction.",
                "Creating a class hierarchy for different shapes, implementing a banking system with accounts and transactions, designing a game with various character types.",
                "Programming Basics, Design Patterns, Software Engineering",
            ),
            KnowledgeEntry::new(
                "Databases",
                "Systems designed to store, retrieve, and manage large amounts of data, often with support for querying and manipulation.",
                "Relational databases, SQL, NoSQL, tables, queries, normalization, transactions, and ACID properties.",
                "Creating a database for a library management system, designing schemas for an e-commerce platform, optimizing queries for a social media application.",
                "Data Structures, Operating Systems",
            ),
            KnowledgeEntry::new(
                "Operating Systems",
                "Software that manages computer hardware and software resources and provides common services for computer programs.",
                "Process management, memory management, file systems, I/O management, virtualization, and security.",
                "Implementing a simple scheduler, designing a memory allocator, creating a basic file system.",
                "Computer Architecture, Networks, Databases",
            ),
        ])
    }

    /// Core topics plus broader CS areas
    pub fn extended() -> Self {
        let mut kb = Self::sample();

        if let Some(entry) = kb.entries.iter_mut().find(|e| e.topic == "Programming Basics") {
            entry.notes.insert(
                "control_structures".to_string(),
                "Control structures direct the flow of execution: sequence, selection (if-else, switch), and iteration (loops).".to_string(),
            );
        }

        kb.entries.extend([
            KnowledgeEntry::new(
                "Artificial Intelligence",
                "The field of computer science focused on creating systems that can perform tasks that typically require human intelligence, such as visual perception, speech recognition, decision-making, and translation.",
                "Machine learning, neural networks, natural language processing, expert systems, robotics, computer vision, and knowledge representation.",
                "Building a chess-playing AI, creating a facial recognition system, developing a language translation service.",
                "Machine Learning, Computer Vision, Natural Language Processing",
            ),
            KnowledgeEntry::new(
                "Machine Learning",
                "A subset of AI that enables systems to learn and improve from experience without being explicitly programmed.",
                "Supervised learning, unsupervised learning, reinforcement learning, neural networks, decision trees, and feature engineering.",
                "Training a model to detect spam emails, clustering customers based on purchasing behavior, teaching an AI to play video games through reinforcement.",
                "Artificial Intelligence, Deep Learning, Data Science",
            ),
            KnowledgeEntry::new(
                "Web Development",
                "The process of creating websites and web applications for the internet or intranet.",
                "HTML, CSS, JavaScript, front-end frameworks, back-end programming, APIs, databases, and responsive design.",
                "Building an e-commerce website, creating a social media platform, developing a blog with a content management system.",
                "Frontend Development, Backend Development, Databases",
            ),
            KnowledgeEntry::new(
                "Cybersecurity",
                "The practice of protecting systems, networks, and programs from digital attacks aimed at accessing, changing, or destroying sensitive information.",
                "Encryption, authentication, authorization, firewalls, intrusion detection, vulnerability assessment, and security policy.",
                "Implementing a secure authentication system, conducting penetration testing, setting up a network firewall.",
                "Cryptography, Network Security, Ethical Hacking",
            ),
            KnowledgeEntry::new(
                "Computer Networks",
                "A collection of computers and devices interconnected by communication channels that allow sharing of resources and information.",
                "TCP/IP, OSI model, routing, switching, network topologies, protocols, and network security.",
                "Setting up a LAN for a small office, configuring a wireless network, implementing a VPN for secure remote access.",
                "Internet, Cybersecurity, Distributed Systems",
            ),
        ]);

        kb
    }
}
