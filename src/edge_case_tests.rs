//! Edge case tests for template expansion
//!
//! This module contains tests for unusual, boundary, and edge cases
//! that might expose bugs or unexpected behavior.

#[cfg(test)]
mod tests {
    use crate::*;
    use pretty_assertions::assert_eq;

    fn site(templates: &str) -> Site {
        SiteBuilder::new()
            .layout_str("# index\n## about\n## Logs\n### day-one")
            .templates_str(templates)
            .build()
            .unwrap()
    }

    fn expand_on(site: &Site, page: &str, line: &str) -> (String, Vec<Warning>) {
        let ctx = RenderContext::for_page(site.tree(), page).unwrap();
        let mut warnings = Warnings::new();
        let output = site.engine().resolve_line(line, ctx, &mut warnings);
        (output, warnings.into_vec())
    }

    fn expand(templates: &str, line: &str) -> (String, Vec<Warning>) {
        expand_on(&site(templates), "index", line)
    }

    #[test]
    fn test_empty_line() {
        let (output, warnings) = expand("", "");
        assert_eq!(output, "");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_dollar_signs_without_invocation() {
        let line = "costs $5, $ alone, $$ double, $name without parens, trailing $";
        let (output, warnings) = expand("", line);
        assert_eq!(output, line);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_closing_sigil() {
        let (output, warnings) = expand("# $W(x)\n($$x$$)", "end with $W(x)");
        assert_eq!(output, "end with $W(x)");
        assert_eq!(
            warnings,
            vec![Warning::MalformedInvocation {
                text: "$W(".to_string()
            }]
        );
    }

    #[test]
    fn test_balanced_parentheses_in_arguments() {
        let (output, warnings) = expand("# $W(x)\n[$$x$$]", "$W(f(a) (b))$");
        assert_eq!(output, "[f(a) (b)]");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_argument_whitespace_is_preserved() {
        let (output, _) = expand("# $W(x)\n[$$x$$]", "$W(  spaced  )$");
        assert_eq!(output, "[  spaced  ]");
    }

    #[test]
    fn test_non_ascii_text_around_invocations() {
        let (output, _) = expand("# $W(x)\n«$$x$$»", "héllo $W(wörld)$ ✓");
        assert_eq!(output, "héllo «wörld» ✓");
    }

    #[test]
    fn test_empty_template_body() {
        let (output, warnings) = expand("# $Empty()\n\n# $Next()\nnext", "[$Empty()$][$Next()$]");
        assert_eq!(output, "[][next]");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_values_are_not_substituted_twice() {
        let (output, warnings) = expand("# $T(a,b)\n<$$a$$|$$b$$>", "$T($$b$$,x)$");
        assert_eq!(output, "<$$b$$|x>");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_long_acyclic_chain() {
        let mut source = String::new();
        for i in 0..50 {
            source.push_str(&format!("# $T{}()\n$T{}()$\n", i, i + 1));
        }
        source.push_str("# $T50()\nend");

        let (output, warnings) = expand(&source, "$T0()$");
        assert_eq!(output, "end");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_nested_invocation_with_commas_is_mis_split() {
        // commas split the raw argument text before nesting is considered;
        // the torn opening stays literal inside the outer body
        let (output, warnings) = expand("# $Pair(x,y)\n[$$x$$|$$y$$]", "$Pair($Pair(a,b)$,c)$");
        assert_eq!(output, "[$Pair(a|b)$]");
        assert_eq!(
            warnings,
            vec![Warning::MalformedInvocation {
                text: "$Pair(".to_string()
            }]
        );
    }

    #[test]
    fn test_nested_invocation_without_commas() {
        let (output, warnings) = expand("# $W(x)\n[$$x$$]", "$W($W($W(core)$)$)$");
        assert_eq!(output, "[[[core]]]");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_function_inside_template_uses_current_page() {
        let site = site("# $Menu()\n<nav>$ChildList(,|)$</nav>");
        let (on_logs, _) = expand_on(&site, "Logs", "$Menu()$");
        assert_eq!(on_logs, "<nav><a href=\"day-one.html\">day-one</a></nav>");

        let (on_leaf, _) = expand_on(&site, "day-one", "$Menu()$");
        assert_eq!(on_leaf, "<nav></nav>");
    }

    #[test]
    fn test_function_arguments_are_not_expanded() {
        let (output, warnings) = expand("", "$ChildList(,$Sep()$)$");
        assert_eq!(
            output,
            "<a href=\"about.html\">about</a>$Sep()$<a href=\"Logs.html\">Logs</a>"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_template_inside_known_one() {
        let (output, warnings) = expand("# $W(x)\n[$$x$$ $Ghost()$]", "$W(a)$");
        assert_eq!(output, "[a $Ghost()$]");
        assert_eq!(
            warnings,
            vec![Warning::UnknownTemplate {
                name: "Ghost".to_string()
            }]
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (output, warnings) = expand("# $Title(t)\n<h1>$$t$$</h1>", "$title(x)$ $childlist()$");
        assert_eq!(output, "$title(x)$ $childlist()$");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_each_line_starts_a_fresh_chain() {
        let site = site("# $A()\na$A()$");
        let (first, first_warnings) = expand_on(&site, "index", "$A()$");
        let (second, second_warnings) = expand_on(&site, "index", "$A()$");
        assert_eq!(first, "a");
        assert_eq!(first, second);
        assert_eq!(first_warnings, second_warnings);
    }
}
