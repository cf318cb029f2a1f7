use anyhow::Context;
use clap::{arg, command, value_parser};
use kleene::{FiniteAutomaton, ReParser};

const STAGE_LONG_HELP: &str = r#"Automaton used for testing the inputs

nfa  the ε-NFA produced by the Thompson construction.
dfa  the complete DFA produced by the subset construction.
min  the minimal DFA (default).

All three accept the same language; they only differ in size.

"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = command!()
        .about("Compile a regular expression in Kleene syntax and test strings against it")
        .arg_required_else_help(true)
        .arg(arg!(<REGEX>).help("Regular expression using `+`, `.`, `*` and parentheses"))
        .arg(
            arg!([INPUT] ...)
                .help("Strings to test for membership"),
        )
        .arg(
            arg!(-s --stage <STAGE>)
                .help("Automaton used for testing the inputs")
                .long_help(STAGE_LONG_HELP)
                .value_parser(["nfa", "dfa", "min"])
                .default_value("min"),
        )
        .arg(
            arg!(--"explicit-concat")
                .help("Require `.` between concatenated operands"),
        )
        .arg(
            arg!(--epsilon <CHAR>)
                .help("Character standing for the empty string [default: λ]")
                .value_parser(value_parser!(char)),
        )
        .arg(arg!(--rpn).help("Print the expression in reverse Polish notation"))
        .arg(arg!(--summary).help("Print the size of the automaton"))
        .get_matches();

    let regex = args.get_one::<String>("REGEX").unwrap();
    let stage = args.get_one::<String>("stage").unwrap();

    let mut parser = ReParser::new();
    parser.implicit_concatenation(!args.get_flag("explicit-concat"));
    if let Some(token) = args.get_one::<char>("epsilon") {
        parser.epsilon_token(*token);
    }

    if args.get_flag("rpn") {
        let rpn = parser
            .to_rpn(regex)
            .with_context(|| format!("can not parse `{regex}`"))?;
        println!("{rpn}");
    }

    let nfa = parser
        .create_automaton(regex)
        .with_context(|| format!("can not compile `{regex}`"))?;

    let automaton = match stage.as_str() {
        "nfa" => nfa,
        "dfa" => nfa.determinize(),
        _ => nfa.minimize(),
    };

    if args.get_flag("summary") {
        print_summary(stage, &automaton);
    }

    for input in args.get_many::<String>("INPUT").into_iter().flatten() {
        let verdict = if automaton.accepts(input) { "accepted" } else { "rejected" };
        println!("{input}\t{verdict}");
    }

    Ok(())
}

fn print_summary(stage: &str, automaton: &FiniteAutomaton) {
    let alphabet: String = automaton.alphabet().iter().collect();
    println!(
        "{stage}: {} states, {} final, {} transitions, alphabet {{{alphabet}}}",
        automaton.num_states(),
        automaton.final_states().len(),
        automaton.num_transitions(),
    );
}
