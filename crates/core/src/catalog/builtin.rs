//! Built-in study content: 15 major and 14 natural minor scales, and a
//! 35-question bank on keys, degrees and the circle of fifths.

type ScaleRow = (&'static str, &'static str, &'static str, [&'static str; 7]);
type QuestionRow = (
    &'static str,
    &'static str,
    [&'static str; 4],
    &'static str,
    &'static str,
);

pub(super) const SCALES: [ScaleRow; 29] = [
    ("c-major", "C", "major", ["C", "D", "E", "F", "G", "A", "B"]),
    ("g-major", "G", "major", ["G", "A", "B", "C", "D", "E", "F#"]),
    ("d-major", "D", "major", ["D", "E", "F#", "G", "A", "B", "C#"]),
    ("a-major", "A", "major", ["A", "B", "C#", "D", "E", "F#", "G#"]),
    ("e-major", "E", "major", ["E", "F#", "G#", "A", "B", "C#", "D#"]),
    ("b-major", "B", "major", ["B", "C#", "D#", "E", "F#", "G#", "A#"]),
    ("fsharp-major", "F#", "major", ["F#", "G#", "A#", "B", "C#", "D#", "E#"]),
    ("csharp-major", "C#", "major", ["C#", "D#", "E#", "F#", "G#", "A#", "B#"]),
    ("f-major", "F", "major", ["F", "G", "A", "Bb", "C", "D", "E"]),
    ("bb-major", "Bb", "major", ["Bb", "C", "D", "Eb", "F", "G", "A"]),
    ("eb-major", "Eb", "major", ["Eb", "F", "G", "Ab", "Bb", "C", "D"]),
    ("ab-major", "Ab", "major", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]),
    ("db-major", "Db", "major", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]),
    ("gb-major", "Gb", "major", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]),
    ("cb-major", "Cb", "major", ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]),
    ("a-minor", "A", "minor", ["A", "B", "C", "D", "E", "F", "G"]),
    ("e-minor", "E", "minor", ["E", "F#", "G", "A", "B", "C", "D"]),
    ("b-minor", "B", "minor", ["B", "C#", "D", "E", "F#", "G", "A"]),
    ("fsharp-minor", "F#", "minor", ["F#", "G#", "A", "B", "C#", "D", "E"]),
    ("csharp-minor", "C#", "minor", ["C#", "D#", "E", "F#", "G#", "A", "B"]),
    ("gsharp-minor", "G#", "minor", ["G#", "A#", "B", "C#", "D#", "E", "F#"]),
    ("dsharp-minor", "D#", "minor", ["D#", "E#", "F#", "G#", "A#", "B", "C#"]),
    ("d-minor", "D", "minor", ["D", "E", "F", "G", "A", "Bb", "C"]),
    ("g-minor", "G", "minor", ["G", "A", "Bb", "C", "D", "Eb", "F"]),
    ("c-minor", "C", "minor", ["C", "D", "Eb", "F", "G", "Ab", "Bb"]),
    ("f-minor", "F", "minor", ["F", "G", "Ab", "Bb", "C", "Db", "Eb"]),
    ("bb-minor", "Bb", "minor", ["Bb", "C", "Db", "Eb", "F", "Gb", "Ab"]),
    ("eb-minor", "Eb", "minor", ["Eb", "F", "Gb", "Ab", "Bb", "Cb", "Db"]),
    ("ab-minor", "Ab", "minor", ["Ab", "Bb", "Cb", "Db", "Eb", "Fb", "Gb"]),
];

pub(super) const QUESTIONS: [QuestionRow; 35] = [
    (
        "q1",
        "What is the relative minor of C major?",
        ["A minor", "E minor", "D minor", "G minor"],
        "A minor",
        "The relative minor is the 6th degree: A.",
    ),
    (
        "q2",
        "What is the tonic of G major?",
        ["G", "A", "D", "C"],
        "G",
        "The tonic is the 1st scale degree.",
    ),
    (
        "q3",
        "How many sharps are in the key of A major?",
        ["2", "3", "4", "1"],
        "3",
        "A major has F#, C#, G#.",
    ),
    (
        "q4",
        "What is the relative major of E minor?",
        ["G major", "A major", "D major", "F major"],
        "G major",
        "Relative major is 3 semitones higher.",
    ),
    (
        "q5",
        "What comes after D in the circle of fifths?",
        ["A", "G", "E", "F"],
        "A",
        "D → A is one perfect fifth upward.",
    ),
    (
        "q6",
        "Which scale degree is the dominant?",
        ["5th", "4th", "3rd", "7th"],
        "5th",
        "Dominant = degree 5.",
    ),
    (
        "q7",
        "What is the relative minor of G major?",
        ["E minor", "A minor", "D minor", "B minor"],
        "E minor",
        "6th degree of G major = E.",
    ),
    (
        "q8",
        "Which major scale has 2 sharps?",
        ["D major", "G major", "A major", "E major"],
        "D major",
        "D major = F#, C#.",
    ),
    (
        "q9",
        "Which major scale has 1 flat?",
        ["F major", "Bb major", "Eb major", "C major"],
        "F major",
        "F major has Bb.",
    ),
    (
        "q10",
        "What is the relative major of D minor?",
        ["F major", "G major", "Bb major", "C major"],
        "F major",
        "D minor's relative major is F.",
    ),
    (
        "q11",
        "What is the 3rd degree of the C major scale?",
        ["E", "D", "G", "F"],
        "E",
        "C-D-E (third).",
    ),
    (
        "q12",
        "Which scale has 5 sharps?",
        ["B major", "E major", "A major", "C# major"],
        "B major",
        "B major = F# C# G# D# A#.",
    ),
    (
        "q13",
        "What is the relative minor of F major?",
        ["D minor", "C minor", "A minor", "G minor"],
        "D minor",
        "F → D is relative minor.",
    ),
    (
        "q14",
        "Which scale has 3 flats?",
        ["Eb major", "Ab major", "Bb major", "Db major"],
        "Eb major",
        "Eb major = Bb, Eb, Ab.",
    ),
    (
        "q15",
        "What comes before F in the circle of fifths?",
        ["Bb", "C", "G", "Eb"],
        "Bb",
        "F → Bb is a perfect fifth downward.",
    ),
    (
        "q16",
        "What is the leading tone of G major?",
        ["F#", "E", "A", "D"],
        "F#",
        "7th degree = leading tone.",
    ),
    (
        "q17",
        "Which major key has no sharps or flats?",
        ["C major", "F major", "G major", "D major"],
        "C major",
        "C major is natural.",
    ),
    (
        "q18",
        "What is the relative minor of Bb major?",
        ["G minor", "F minor", "D minor", "A minor"],
        "G minor",
        "6th degree of Bb = G.",
    ),
    (
        "q19",
        "How many flats are in Ab major?",
        ["4", "3", "2", "5"],
        "4",
        "Ab = Bb, Eb, Ab, Db.",
    ),
    (
        "q20",
        "What is the 4th degree of D major?",
        ["G", "A", "E", "F#"],
        "G",
        "D-E-F#-G (fourth).",
    ),
    (
        "q21",
        "Which minor scale has 1 sharp?",
        ["E minor", "A minor", "D minor", "G minor"],
        "E minor",
        "E minor has F#.",
    ),
    (
        "q22",
        "Which scale is enharmonic to C# major?",
        ["Db major", "Eb major", "B major", "Gb major"],
        "Db major",
        "C# = Db enharmonic.",
    ),
    (
        "q23",
        "What comes after A in the circle of fifths?",
        ["E", "D", "B", "F#"],
        "E",
        "A → E (perfect 5th).",
    ),
    (
        "q24",
        "What is the relative minor of E major?",
        ["C# minor", "F# minor", "G# minor", "D# minor"],
        "C# minor",
        "6th degree of E = C#.",
    ),
    (
        "q25",
        "What is the subdominant of A major?",
        ["D", "E", "C#", "F#"],
        "D",
        "4th degree = D.",
    ),
    (
        "q26",
        "Which scale has 6 sharps?",
        ["F# major", "E major", "B major", "C# major"],
        "F# major",
        "F# major = 6 sharps.",
    ),
    (
        "q27",
        "What is the relative major of C minor?",
        ["Eb major", "G major", "Bb major", "F major"],
        "Eb major",
        "C minor → Eb major.",
    ),
    (
        "q28",
        "What is the 6th degree of F major?",
        ["D", "C", "E", "G"],
        "D",
        "F-G-A-Bb-C-D.",
    ),
    (
        "q29",
        "Which major scale has 5 flats?",
        ["Db major", "Ab major", "Eb major", "Gb major"],
        "Db major",
        "Db = Bb, Eb, Ab, Db, Gb.",
    ),
    (
        "q30",
        "Which key is enharmonic to F# major?",
        ["Gb major", "Cb major", "Eb major", "Db major"],
        "Gb major",
        "F# = Gb.",
    ),
    (
        "q31",
        "What is the mediant of C major?",
        ["E", "G", "A", "F"],
        "E",
        "3rd degree = mediant.",
    ),
    (
        "q32",
        "What is the relative minor of B♭ major?",
        ["G minor", "B minor", "C minor", "D minor"],
        "G minor",
        "Bb → G.",
    ),
    (
        "q33",
        "How many sharps are in the key of E major?",
        ["4", "3", "2", "5"],
        "4",
        "E major = F#, C#, G#, D#.",
    ),
    (
        "q34",
        "What comes before D in the circle of fifths?",
        ["G", "A", "C", "E"],
        "G",
        "G → D (up), so before D is G.",
    ),
    (
        "q35",
        "What is the supertonic of A major?",
        ["B", "C#", "F#", "E"],
        "B",
        "2nd degree = B.",
    ),
];
