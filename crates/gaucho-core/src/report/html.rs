//! Static HTML rendering of organized evaluation logs.
//!
//! The page is self-contained apart from Bootstrap and jQuery pulled from
//! public CDNs. Prompts and test cases can be toggled between active and
//! inactive sections; only responses for active prompts and cases are shown.

use super::organize::OrganizedLogs;

const PAGE_HEAD: &str = r##"
<!DOCTYPE html>
<html>

<head>
    <title>Chat Opener Evaluation</title>
    <!-- Bootstrap CSS -->
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.1.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <script>
        function sortSection(sectionElement) {
            Array.from(sectionElement.children)
                .map(function (element) { return { element: element, index: parseInt(element.textContent.match(/\d+/)[0]) }; })
                .sort(function (a, b) { return a.index - b.index; })
                .forEach(function (obj) { sectionElement.appendChild(obj.element); });
        }

        function showActive() {
            $('.case-response').hide();
            $('#activePromptSection .dropdown-item').each(function () {
                $('[data-prompt-id="' + this.id + '"]').show();
            });
            $('.test-case').hide();
            $('#activeCaseSection .dropdown-item').each(function () {
                $('[data-case-id="' + this.id + '"]').show();
            });
        }

        function toggleStatus(itemElement) {
            var activeSectionId = "active" + itemElement.role + "Section";
            var isActive = itemElement.closest('.collapse').id === activeSectionId;
            var targetSectionId = isActive ? "in" + activeSectionId : activeSectionId;
            var targetSection = document.getElementById(targetSectionId);

            targetSection.appendChild(itemElement);
            sortSection(targetSection);
            showActive();
        }
    </script>
    <style>
        .sticky-top {
            position: sticky;
            top: 0;
            z-index: 1020;
        }

        .scrollable-menu {
            height: auto;
            max-height: 200px;
            overflow-x: hidden;
            overflow-y: auto;
        }

        .toggle-button {
            font-weight: bold;
        }

        .prompt-item {
            padding-left: 20px;
            color: #495057;
        }

        .arrow {
            display: inline-block;
            width: 0;
            height: 0;
            margin-left: 5px;
            vertical-align: middle;
            border-top: 5px solid;
            border-right: 5px solid transparent;
            border-left: 5px solid transparent;
        }

        .collapse.show+.dropdown-item .arrow {
            transform: rotate(180deg);
        }
    </style>
</head>

<body>
    <nav class="navbar navbar-expand-lg navbar-light bg-light sticky-top">
        <div class="container-fluid">
            <a class="navbar-brand" href="#">Chat Opener Evaluation</a>
            <ul class="navbar-nav">
                <li class="nav-item dropdown">
                    <a class="nav-link dropdown-toggle" href="#" id="navbarDropdownPrompts" role="button"
                        data-bs-toggle="dropdown" data-bs-auto-close="outside" aria-expanded="false">
                        Prompts
                    </a>
                    <ul class="dropdown-menu scrollable-menu" aria-labelledby="navbarDropdownPrompts">
                        <li>
                            <a class="dropdown-item" href="#" data-bs-toggle="collapse"
                                data-bs-target="#activePromptSection">Active Prompts<span class="arrow"></span></a>
                            <div id="activePromptSection" class="toggle-button collapse show">
"##;

const PROMPTS_TAIL: &str = r##"
                            </div>
                        </li>

                        <li>
                            <a class="dropdown-item" href="#" data-bs-toggle="collapse"
                                data-bs-target="#inactivePromptSection">Inactive Prompts<span class="arrow"></span></a>
                            <div id="inactivePromptSection" class="toggle-button collapse">
                            </div>
                        </li>

                    </ul>
                </li>
                <li class="nav-item dropdown">
                    <a class="nav-link dropdown-toggle" href="#" id="navbarDropdownTestCases" role="button"
                        data-bs-toggle="dropdown" data-bs-auto-close="outside" aria-expanded="false">
                        Test Cases
                    </a>
                    <ul class="dropdown-menu dropdown-menu-end scrollable-menu" aria-labelledby="navbarDropdownTestCases">
                        <li>
                            <a class="dropdown-item" href="#" data-bs-toggle="collapse"
                                data-bs-target="#activeCaseSection">Active Cases<span class="arrow"></span></a>
                            <div id="activeCaseSection" class="toggle-button collapse show">
"##;

const CASES_TAIL: &str = r##"
                            </div>
                        </li>

                        <li>
                            <a class="dropdown-item" href="#" data-bs-toggle="collapse"
                                data-bs-target="#inactiveCaseSection">Inactive Cases<span class="arrow"></span></a>
                            <div id="inactiveCaseSection" class="toggle-button collapse">
                            </div>
                        </li>

                    </ul>
                </li>
            </ul>
        </div>
    </nav>
    <div class="container mt-4">
        <div id="testCasesContent">
"##;

const PAGE_TAIL: &str = r##"
        </div>
    </div>
    <!-- Bootstrap JS -->
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.1.0/dist/js/bootstrap.bundle.min.js"></script>
    <script src="https://code.jquery.com/jquery-3.3.1.slim.min.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/popper.js/1.14.7/umd/popper.min.js"></script>

    <script>
        document.addEventListener("DOMContentLoaded", function () {
            document.querySelectorAll('.prompt-item, .case-item').forEach(function (item) {
                item.addEventListener('click', function () {
                    toggleStatus(this);
                });
            });
        });
        $(document).ready(function () {
            $('#activePromptSection, #inactivePromptSection, #activeCaseSection, #inactiveCaseSection').on('show.bs.collapse', function () {
                $(this).prev('.dropdown-item').find('.arrow').css('transform', 'rotate(180deg)');
            }).on('hide.bs.collapse', function () {
                $(this).prev('.dropdown-item').find('.arrow').css('transform', '');
            });

            $('[data-bs-toggle="popover"]').popover({ trigger: "hover" });
        });
    </script>
</body>

</html>
"##;

/// Escape text for HTML bodies and single- or double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the "Chat Opener Evaluation" page.
pub fn render_report(logs: &OrganizedLogs) -> String {
    let mut html = String::from(PAGE_HEAD);

    for (number, prompt) in logs.prompts() {
        html.push_str(&format!(
            "<a id='prompt{number}' class='dropdown-item prompt-item' role='Prompt' \
             data-bs-toggle='popover' data-bs-container='body' data-bs-placement='left' \
             data-bs-content='{}' href='#'>Prompt {number}</a>\n",
            escape_html(prompt)
        ));
    }
    html.push_str(PROMPTS_TAIL);

    for (i, case) in logs.cases().iter().enumerate() {
        let number = i + 1;
        html.push_str(&format!(
            "<a id='case{number}' class='dropdown-item case-item' role='Case' \
             data-bs-toggle='popover' data-bs-container='body' data-bs-placement='left' \
             data-bs-content='{}' href='#'>Test Case {number}</a>\n",
            escape_html(&case.text)
        ));
    }
    html.push_str(CASES_TAIL);

    for (i, case) in logs.cases().iter().enumerate() {
        let number = i + 1;
        html.push_str(&format!(
            "<div class='test-case' data-case-id='case{number}'><h3>Test Case {number}: {}</h3>\n",
            escape_html(&case.text)
        ));
        for record in &case.records {
            let prompt_number = logs.prompt_number(&record.opener_prompt).unwrap_or_default();
            html.push_str(&format!(
                "<p class='case-response' data-prompt-id='prompt{prompt_number}'>Prompt {prompt_number}: {}</p>\n",
                escape_html(&record.response)
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::organize::organize_logs;

    const LOG: &str = r#"{"Opener_prompt": "Ask about <travel>", "text": "hi", "response": "Where would you teleport?"}
{"Opener_prompt": "Ask about food", "text": "hi", "response": "Tea or coffee?"}
{"Opener_prompt": "Ask about <travel>", "text": "I'm 'bored'", "response": "Let's fix that & play!"}
"#;

    fn rendered() -> String {
        render_report(&organize_logs(LOG.as_bytes()).unwrap())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_page_frame() {
        let html = rendered();
        assert!(html.trim_start().starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Chat Opener Evaluation</title>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_prompt_items_escaped_and_numbered() {
        let html = rendered();
        assert!(html.contains("id='prompt1'"));
        assert!(html.contains("id='prompt2'"));
        assert!(!html.contains("id='prompt3'"));
        assert!(html.contains("data-bs-content='Ask about &lt;travel&gt;'"));
    }

    #[test]
    fn test_cases_and_responses() {
        let html = rendered();
        assert!(html.contains("<div class='test-case' data-case-id='case1'><h3>Test Case 1: hi</h3>"));
        assert!(html.contains("<h3>Test Case 2: I&#x27;m &#x27;bored&#x27;</h3>"));
        assert!(html.contains(
            "<p class='case-response' data-prompt-id='prompt2'>Prompt 2: Tea or coffee?</p>"
        ));
        assert!(html.contains("Prompt 1: Let&#x27;s fix that &amp; play!"));
    }

    #[test]
    fn test_anchor_links_survive_in_markup() {
        let html = rendered();
        assert!(html.contains("data-bs-target=\"#activePromptSection\""));
        assert!(html.contains("id=\"navbarDropdownTestCases\" role=\"button\""));
        assert!(html.contains(r##"<a class="navbar-brand" href="#">Chat Opener Evaluation</a>"##));
        assert!(html.contains("href='#'>Prompt 1</a>"));
        assert!(html.contains("href='#'>Test Case 2</a>"));
        assert!(html.contains("$('[data-bs-toggle=\"popover\"]').popover"));
    }

    #[test]
    fn test_empty_logs_still_render_page() {
        let html = render_report(&OrganizedLogs::new());
        assert!(html.contains("id=\"activePromptSection\""));
        assert!(!html.contains("class='test-case'"));
    }
}
