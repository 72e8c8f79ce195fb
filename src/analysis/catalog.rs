use crate::models::issue::Severity;

/// Static definition of an issue type, seeded into the store on open.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub category: &'static str,
    /// What the crawler observed.
    pub description: &'static str,
    pub why_it_matters: &'static str,
    /// Default remediation shown when a detection carries no hint of its own.
    pub fix_hint: &'static str,
    pub technical_notes: &'static str,
}

pub const ISSUE_CATALOG: &[CatalogEntry] = &[
    // Crawl and server response
    CatalogEntry {
        code: "CRAWL_ERROR_4XX",
        name: "4xx errors on pages",
        severity: Severity::Critical,
        category: "technical",
        description: "The URL returns a 4xx HTTP status (404, 403, 401 and similar).",
        why_it_matters: "4xx errors frustrate visitors and fragment site authority. Crawlers waste time on URLs that add no value.",
        fix_hint: "Restore the page with a 200 response, or 301-redirect it to the most relevant page and update internal links.",
        technical_notes: "Check server logs, internal links, sitemap.xml and canonical tags pointing at this URL.",
    },
    CatalogEntry {
        code: "CRAWL_ERROR_5XX",
        name: "5xx server errors",
        severity: Severity::Critical,
        category: "technical",
        description: "The URL returns a 5xx server error (500, 502, 503, 504 and similar).",
        why_it_matters: "5xx errors point at server problems. When frequent they hurt crawlability, indexing and user trust.",
        fix_hint: "Escalate to the hosting team; check server logs, timeouts and load spikes, and add monitoring.",
        technical_notes: "Check server logs, reverse proxy configuration, the application runtime and the database.",
    },
    CatalogEntry {
        code: "REDIRECT_3XX",
        name: "301/302 redirects",
        severity: Severity::Major,
        category: "technical",
        description: "The URL answers with a redirect status (301 or 302).",
        why_it_matters: "Redirects are normal, but too many of them add load delay and leak authority when chained or misconfigured.",
        fix_hint: "Point internal links directly at the final destination and remove redirects that are not needed.",
        technical_notes: "Look for redirect chains and update internal links to point at the final URL.",
    },
    CatalogEntry {
        code: "REDIRECT_CHAIN",
        name: "Redirect chains",
        severity: Severity::Major,
        category: "technical",
        description: "The URL is part of a chain of consecutive redirects.",
        why_it_matters: "Every extra hop adds latency, spends crawl budget and can fail on its own.",
        fix_hint: "Redirect the first URL straight to the final URL without intermediate hops.",
        technical_notes: "Map the full sequence (A to B to C) and collapse it into a single hop (A to C).",
    },
    CatalogEntry {
        code: "REDIRECT_LOOP",
        name: "Redirect loops",
        severity: Severity::Critical,
        category: "technical",
        description: "Circular redirects prevent the content from being reached.",
        why_it_matters: "Redirect loops block users and crawlers alike, so the page can be neither crawled nor indexed.",
        fix_hint: "Break the loop so the URL resolves to a single final page with a 200 response.",
        technical_notes: "Review redirect rules in the web server, the CDN and the CMS.",
    },
    CatalogEntry {
        code: "SERVER_RESPONSE_SLOW",
        name: "Slow server response time",
        severity: Severity::Major,
        category: "performance",
        description: "The server takes too long to answer the initial request (high TTFB).",
        why_it_matters: "A high TTFB slows perceived speed and Core Web Vitals, which affects rankings and conversion.",
        fix_hint: "Reduce TTFB with caching, query optimisation and adequate server resources or a CDN.",
        technical_notes: "Use APM tooling and logs to find backend bottlenecks.",
    },
    CatalogEntry {
        code: "PAGE_LOAD_SLOW",
        name: "Excessive page load time",
        severity: Severity::Major,
        category: "performance",
        description: "The total page load time is too high.",
        why_it_matters: "Slow pages drive visitors away, lower satisfaction and hurt SEO performance.",
        fix_hint: "Trim page weight, defer non-critical scripts and optimise images.",
        technical_notes: "Inspect the resource waterfall in Lighthouse or DevTools to prioritise optimisations.",
    },
    // Content
    CatalogEntry {
        code: "TITLE_MISSING",
        name: "Missing page title",
        severity: Severity::Major,
        category: "content",
        description: "The page has no <title> element.",
        why_it_matters: "The title is one of the strongest on-page signals and directly drives click-through rate.",
        fix_hint: "Add a unique, descriptive <title> that includes the page's main keyword.",
        technical_notes: "Define <title> in the site template or in the CMS.",
    },
    CatalogEntry {
        code: "TITLE_DUPLICATE",
        name: "Duplicate titles",
        severity: Severity::Major,
        category: "content",
        description: "Several pages share the same title.",
        why_it_matters: "Duplicate titles make it hard for search engines to tell pages apart and dilute the relevance of each.",
        fix_hint: "Give every page its own title that reflects its specific content.",
        technical_notes: "Build titles from template variables so each page type yields unique titles.",
    },
    CatalogEntry {
        code: "TITLE_TOO_LONG",
        name: "Title too long",
        severity: Severity::Minor,
        category: "content",
        description: "The title exceeds the recommended length.",
        why_it_matters: "Long titles are truncated in search results and can lower click-through rate.",
        fix_hint: "Shorten the title to roughly 60 characters, keeping the key terms first.",
        technical_notes: "Aim for roughly 580 px of visual width.",
    },
    CatalogEntry {
        code: "TITLE_TOO_SHORT",
        name: "Title too short",
        severity: Severity::Minor,
        category: "content",
        description: "The title is too short or not descriptive.",
        why_it_matters: "Vague titles make the content harder to understand and lower click-through rate.",
        fix_hint: "Expand the title so it describes the page and its intent.",
        technical_notes: "Avoid generic titles such as 'Home', 'Page 1' or 'Product'.",
    },
    CatalogEntry {
        code: "META_DESCRIPTION_MISSING",
        name: "Missing meta description",
        severity: Severity::Minor,
        category: "content",
        description: "The page has no meta description.",
        why_it_matters: "A well-written meta description raises click-through rate even though it is not a direct ranking factor.",
        fix_hint: "Write a meta description that summarises the page and invites the click.",
        technical_notes: "Use <meta name='description' content='...'>.",
    },
    CatalogEntry {
        code: "META_DESCRIPTION_DUPLICATE",
        name: "Duplicate meta descriptions",
        severity: Severity::Minor,
        category: "content",
        description: "Several pages share exactly the same meta description.",
        why_it_matters: "Duplicate descriptions confuse users and make pages harder to tell apart in search results.",
        fix_hint: "Write a distinct meta description for each page.",
        technical_notes: "Use per page-type templates when handling large volumes.",
    },
    CatalogEntry {
        code: "META_DESCRIPTION_TOO_LONG",
        name: "Meta description too long",
        severity: Severity::Minor,
        category: "content",
        description: "The meta description exceeds the recommended length.",
        why_it_matters: "Long descriptions are cut off in the snippet and lose impact.",
        fix_hint: "Keep the meta description around 155 characters.",
        technical_notes: "Lead with the key message and drop filler phrases.",
    },
    CatalogEntry {
        code: "META_DESCRIPTION_TOO_SHORT",
        name: "Meta description too short",
        severity: Severity::Minor,
        category: "content",
        description: "The meta description is too short or uninformative.",
        why_it_matters: "Very short descriptions do not earn the click and miss conversion opportunities.",
        fix_hint: "Extend the meta description with a useful summary of the page.",
        technical_notes: "Avoid single-word descriptions and generic phrases.",
    },
    CatalogEntry {
        code: "H1_MISSING",
        name: "Missing H1 heading",
        severity: Severity::Major,
        category: "content",
        description: "The page has no H1 heading.",
        why_it_matters: "The H1 structures the content and tells search engines what the page is about.",
        fix_hint: "Add a single H1 that states the main topic of the page.",
        technical_notes: "Use a single H1 per page in most cases.",
    },
    CatalogEntry {
        code: "H1_MULTIPLE",
        name: "Multiple H1 headings",
        severity: Severity::Minor,
        category: "content",
        description: "The page defines more than one H1.",
        why_it_matters: "Several H1s blur the structure and topical focus of the page.",
        fix_hint: "Keep one H1 and demote the others to H2 or lower.",
        technical_notes: "Check templates and reusable components that may inject extra H1s.",
    },
    CatalogEntry {
        code: "H1_DUPLICATE",
        name: "Duplicate H1 across pages",
        severity: Severity::Minor,
        category: "content",
        description: "Several pages share exactly the same H1.",
        why_it_matters: "Duplicate H1s reduce topical clarity and can spread relevance across several URLs.",
        fix_hint: "Make each page's H1 specific to its content.",
        technical_notes: "Use dynamic patterns that include unique attributes such as product or category names.",
    },
    CatalogEntry {
        code: "CONTENT_DUPLICATE",
        name: "Duplicate content",
        severity: Severity::Major,
        category: "content",
        description: "The main content is very similar or identical to other URLs.",
        why_it_matters: "Duplicate content makes it hard to choose which version to show and dilutes relevance signals.",
        fix_hint: "Consolidate duplicates with a canonical tag or 301 redirect, or rewrite the content.",
        technical_notes: "Look for auto-generated content, filters and URL parameters.",
    },
    CatalogEntry {
        code: "CONTENT_THIN",
        name: "Thin content",
        severity: Severity::Major,
        category: "content",
        description: "The page has very little text or adds too little content.",
        why_it_matters: "Thin pages offer little value and tend to rank poorly for competitive queries.",
        fix_hint: "Expand the page with useful, original content or merge it into a stronger page.",
        technical_notes: "Review listing templates, product sheets and mass-generated pages.",
    },
    CatalogEntry {
        code: "CONTENT_EMPTY",
        name: "Pages without content",
        severity: Severity::Critical,
        category: "content",
        description: "The page has practically no visible content.",
        why_it_matters: "Empty pages give a poor experience, raise bounce rate and can be judged low quality.",
        fix_hint: "Publish the intended content or remove the page from the site and sitemap.",
        technical_notes: "Look for URLs created automatically without content, such as filters, tags or empty archives.",
    },
    // URL structure
    CatalogEntry {
        code: "URL_TOO_LONG",
        name: "URL too long",
        severity: Severity::Minor,
        category: "technical",
        description: "The URL is longer than recommended.",
        why_it_matters: "Very long URLs are harder to share and read, and may be truncated in search results.",
        fix_hint: "Use shorter, descriptive slugs and redirect the old URL.",
        technical_notes: "Keep URLs clean, readable and short where possible.",
    },
    CatalogEntry {
        code: "URL_TOO_MANY_PARAMS",
        name: "URL with excessive parameters",
        severity: Severity::Minor,
        category: "technical",
        description: "The URL carries too many query parameters.",
        why_it_matters: "Many parameters create duplicate or near-duplicate versions of the same page.",
        fix_hint: "Reduce query parameters and canonicalise parameter variants.",
        technical_notes: "Configure parameter handling in Search Console and in your analytics platform.",
    },
    CatalogEntry {
        code: "URL_NON_CANONICAL",
        name: "Non-canonical URLs",
        severity: Severity::Major,
        category: "technical",
        description: "The URL does not match the expected canonical version.",
        why_it_matters: "URL variants without a clear canonical create duplication and split ranking signals.",
        fix_hint: "Link internally to the canonical version of the URL.",
        technical_notes: "Review URL rewrite rules and canonical tags in templates.",
    },
    CatalogEntry {
        code: "URL_SPECIAL_CHARS",
        name: "URL with special or non-ASCII characters",
        severity: Severity::Minor,
        category: "technical",
        description: "The URL contains special, accented or non-ASCII characters.",
        why_it_matters: "Special characters cause encoding problems and break shared links.",
        fix_hint: "Use lowercase ASCII letters, digits and hyphens in URLs.",
        technical_notes: "Avoid spaces, accents, symbols and unencoded reserved characters.",
    },
    CatalogEntry {
        code: "URL_UPPERCASE",
        name: "URL with uppercase letters",
        severity: Severity::Minor,
        category: "technical",
        description: "The URL contains uppercase letters.",
        why_it_matters: "Case sensitivity can produce duplicate versions and broken links.",
        fix_hint: "Serve lowercase URLs and redirect uppercase variants.",
        technical_notes: "Normalise URL case with server rules.",
    },
    CatalogEntry {
        code: "URL_UNDERSCORES",
        name: "URL with underscores",
        severity: Severity::Minor,
        category: "technical",
        description: "The URL uses underscores (_) instead of hyphens (-).",
        why_it_matters: "Hyphens are the recommended word separator; underscores make URLs harder to read.",
        fix_hint: "Use hyphens instead of underscores to separate words.",
        technical_notes: "Change URL structure only with well-mapped 301 redirects.",
    },
    // Links
    CatalogEntry {
        code: "INTERNAL_BROKEN_LINK",
        name: "Broken internal links",
        severity: Severity::Major,
        category: "links",
        description: "The page links internally to URLs that return errors.",
        why_it_matters: "Broken internal links hurt the user experience and waste crawl budget.",
        fix_hint: "Update or remove internal links that point to missing pages.",
        technical_notes: "Use a crawler to list every broken internal link by source and target.",
    },
    CatalogEntry {
        code: "EXTERNAL_BROKEN_LINK",
        name: "Broken external links",
        severity: Severity::Minor,
        category: "links",
        description: "The page links externally to URLs that return errors.",
        why_it_matters: "Broken outbound links frustrate users and signal a poorly maintained site.",
        fix_hint: "Replace or remove links to external pages that no longer exist.",
        technical_notes: "Review resource, reference and partner links periodically.",
    },
    CatalogEntry {
        code: "OUTBOUND_TO_ERROR_PAGE",
        name: "Outbound links to error pages",
        severity: Severity::Minor,
        category: "links",
        description: "Internal or external links lead to pages that return errors.",
        why_it_matters: "Users following these links hit errors and may leave the site.",
        fix_hint: "Point outbound links at working destinations.",
        technical_notes: "Join crawl data with target status codes to find these links.",
    },
    CatalogEntry {
        code: "ORPHAN_PAGE",
        name: "Orphan pages",
        severity: Severity::Major,
        category: "links",
        description: "The page receives no internal links from the rest of the site.",
        why_it_matters: "Orphan pages are hard for crawlers and users to discover and usually perform poorly.",
        fix_hint: "Link to the page from relevant sections or remove it if it has no purpose.",
        technical_notes: "Compare crawled URLs with sitemap URLs and internal links to detect orphans.",
    },
    CatalogEntry {
        code: "CRAWL_DEPTH_EXCESSIVE",
        name: "Excessive crawl depth",
        severity: Severity::Minor,
        category: "links",
        description: "The page sits too many clicks away from the home page.",
        why_it_matters: "Deep pages are crawled less often and receive fewer quality internal links.",
        fix_hint: "Bring important pages within three clicks of the home page.",
        technical_notes: "Keep important pages within 3 to 4 clicks of the home page.",
    },
    CatalogEntry {
        code: "TOO_MANY_LINKS",
        name: "Too many links on a page",
        severity: Severity::Minor,
        category: "links",
        description: "The page contains an excessive number of links.",
        why_it_matters: "Too many links scatter user attention and dilute the authority passed on.",
        fix_hint: "Reduce the number of links to those that matter to users.",
        technical_notes: "There is no magic number, but review pages with hundreds of links.",
    },
    // Indexing directives
    CatalogEntry {
        code: "CANONICAL_MISSING",
        name: "Missing canonical tag",
        severity: Severity::Minor,
        category: "technical",
        description: "The page does not declare a canonical tag.",
        why_it_matters: "Without a canonical, URL variants compete with each other and split SEO signals.",
        fix_hint: "Add a self-referencing canonical tag.",
        technical_notes: "Add <link rel='canonical' href='URL' /> to the <head>.",
    },
    CatalogEntry {
        code: "CANONICAL_INCORRECT",
        name: "Incorrect or conflicting canonical",
        severity: Severity::Major,
        category: "technical",
        description: "The canonical does not match the expected main URL or conflicts with other signals.",
        why_it_matters: "A wrong canonical can deindex important versions or consolidate signals onto the wrong URL.",
        fix_hint: "Point the canonical at the preferred, indexable URL.",
        technical_notes: "Review canonicals together with redirects, hreflang and the sitemap.",
    },
    CatalogEntry {
        code: "CANONICAL_CHAIN",
        name: "Canonical chains",
        severity: Severity::Minor,
        category: "technical",
        description: "The canonical points at a URL that itself declares another canonical.",
        why_it_matters: "Chains add needless complexity and send ambiguous signals.",
        fix_hint: "Point every canonical directly at the final preferred URL.",
        technical_notes: "Avoid A to B to C in canonicals; point A and B straight at C.",
    },
    CatalogEntry {
        code: "CANONICAL_TO_ERROR",
        name: "Canonical pointing to an error page",
        severity: Severity::Major,
        category: "technical",
        description: "The canonical points at a URL that returns an error status.",
        why_it_matters: "Consolidating signals onto an error URL wastes relevance and potential traffic.",
        fix_hint: "Point the canonical at a live page returning 200.",
        technical_notes: "Join canonicals with HTTP status codes to detect this case.",
    },
    CatalogEntry {
        code: "ROBOTS_BLOCKING_INDEXABLE",
        name: "Indexable pages blocked by robots.txt",
        severity: Severity::Major,
        category: "technical",
        description: "The page is blocked in robots.txt but is meant to be indexed.",
        why_it_matters: "Blocking crawling stops search engines from understanding the content and applying ranking signals.",
        fix_hint: "Allow crawling of the page or mark it noindex intentionally.",
        technical_notes: "Review /robots.txt and its per-path rules.",
    },
    CatalogEntry {
        code: "ROBOTS_CONFLICT",
        name: "robots.txt and meta robots conflict",
        severity: Severity::Minor,
        category: "technical",
        description: "robots.txt directives conflict with meta robots or X-Robots-Tag.",
        why_it_matters: "Contradicting directives lead to unexpected crawling and indexing behaviour.",
        fix_hint: "Align robots.txt rules with the page's meta robots directives.",
        technical_notes: "Define a clear policy per content type: public, private, filtered and so on.",
    },
    CatalogEntry {
        code: "NOINDEX_ON_IMPORTANT",
        name: "noindex on important pages",
        severity: Severity::Critical,
        category: "technical",
        description: "Pages that should rank carry a noindex directive.",
        why_it_matters: "A noindex on key pages removes them from organic search entirely.",
        fix_hint: "Remove the noindex directive from pages that should rank.",
        technical_notes: "Search for 'noindex' in templates, plugins and server rules.",
    },
    CatalogEntry {
        code: "NOFOLLOW_MISUSED",
        name: "Misused nofollow directives",
        severity: Severity::Minor,
        category: "technical",
        description: "nofollow is used on links or pages where it serves no strategic purpose.",
        why_it_matters: "Misapplied nofollow limits how internal authority is distributed.",
        fix_hint: "Remove nofollow from internal links that should pass authority.",
        technical_notes: "Review rel='nofollow' in templates and components.",
    },
    CatalogEntry {
        code: "INDEXABLE_BUT_NOT_CRAWLABLE",
        name: "Indexable but not crawlable pages",
        severity: Severity::Major,
        category: "technical",
        description: "The page can be indexed but is blocked from crawling.",
        why_it_matters: "Search engines struggle to refresh or understand content they cannot crawl.",
        fix_hint: "Make the page reachable by crawlers through links and robots rules.",
        technical_notes: "Without crawling, links, content and structured data signals go mostly unused.",
    },
    // Images
    CatalogEntry {
        code: "IMAGE_ALT_MISSING",
        name: "Images without ALT attribute",
        severity: Severity::Minor,
        category: "content",
        description: "The image has no ALT attribute.",
        why_it_matters: "ALT text improves accessibility and content understanding, and helps image search.",
        fix_hint: "Add descriptive ALT text to meaningful images.",
        technical_notes: "Review card, slider, gallery and media component templates.",
    },
    CatalogEntry {
        code: "IMAGE_ALT_EMPTY",
        name: "Images with empty ALT",
        severity: Severity::Minor,
        category: "content",
        description: "The image has an empty ALT attribute without need.",
        why_it_matters: "Empty ALT on key images wastes accessibility and context opportunities.",
        fix_hint: "Describe the image in its ALT text unless it is purely decorative.",
        technical_notes: "Tell decorative images apart from content images.",
    },
    CatalogEntry {
        code: "IMAGE_BROKEN",
        name: "Broken images",
        severity: Severity::Minor,
        category: "content",
        description: "The referenced image does not load (404 or another error).",
        why_it_matters: "Broken images degrade the experience and make the page look neglected.",
        fix_hint: "Fix or remove image references that fail to load.",
        technical_notes: "Check relative paths, permissions and asset deployments.",
    },
    CatalogEntry {
        code: "IMAGE_TOO_HEAVY",
        name: "Images too large",
        severity: Severity::Major,
        category: "performance",
        description: "The image file is too large for its use.",
        why_it_matters: "Heavy images are one of the main causes of slow pages.",
        fix_hint: "Compress images and serve modern formats at the displayed size.",
        technical_notes: "Automate compression in the media pipeline or the CDN.",
    },
    // International
    CatalogEntry {
        code: "HREFLANG_MISSING",
        name: "Missing hreflang tags",
        severity: Severity::Minor,
        category: "internationalization",
        description: "A multilingual page has no hreflang tags.",
        why_it_matters: "hreflang serves the right version per country and language and reduces cross-market duplication.",
        fix_hint: "Add hreflang annotations for every language version.",
        technical_notes: "Keep every version reciprocal and consistent.",
    },
    CatalogEntry {
        code: "HREFLANG_INCORRECT",
        name: "Incorrect hreflang tags",
        severity: Severity::Major,
        category: "internationalization",
        description: "hreflang points at wrong URLs or uses invalid language or region codes.",
        why_it_matters: "Broken implementations can make search engines ignore hreflang and show the wrong version.",
        fix_hint: "Use valid language-region codes and absolute URLs in hreflang.",
        technical_notes: "Validate with hreflang testing tools and review sitemap alternates.",
    },
    CatalogEntry {
        code: "HREFLANG_NO_RECIPROCITY",
        name: "hreflang without return links",
        severity: Severity::Minor,
        category: "internationalization",
        description: "One version references another with hreflang but the reference is not returned.",
        why_it_matters: "Reciprocity is required before search engines trust an hreflang setup.",
        fix_hint: "Make each alternate page link back to the others.",
        technical_notes: "Validate URL pairs across languages and regions.",
    },
    CatalogEntry {
        code: "HREFLANG_CANONICAL_CONFLICT",
        name: "hreflang and canonical conflict",
        severity: Severity::Major,
        category: "internationalization",
        description: "The canonical does not match the version named by hreflang.",
        why_it_matters: "Contradicting signals can deindex a version or cost it relevance.",
        fix_hint: "Reference only canonical URLs in hreflang annotations.",
        technical_notes: "Review multilingual templates and alternate annotations.",
    },
    // Sitemap
    CatalogEntry {
        code: "SITEMAP_URL_ERROR",
        name: "Sitemap URLs returning errors",
        severity: Severity::Major,
        category: "sitemap",
        description: "The sitemap lists URLs that return error statuses.",
        why_it_matters: "A clean sitemap makes search engines trust the signals you send.",
        fix_hint: "Remove error URLs from the sitemap or fix the pages.",
        technical_notes: "Compare the sitemap listing with crawl results.",
    },
    CatalogEntry {
        code: "SITEMAP_URL_BLOCKED_ROBOTS",
        name: "Sitemap URLs blocked by robots.txt",
        severity: Severity::Major,
        category: "sitemap",
        description: "The sitemap lists URLs that robots.txt blocks.",
        why_it_matters: "Sitemap and robots.txt sending opposite signals muddies your SEO strategy.",
        fix_hint: "List only crawlable URLs in the sitemap.",
        technical_notes: "Review indexing policies per content type.",
    },
    CatalogEntry {
        code: "SITEMAP_URL_NOINDEX",
        name: "Sitemap URLs with noindex",
        severity: Severity::Major,
        category: "sitemap",
        description: "The sitemap lists URLs marked noindex.",
        why_it_matters: "A sitemap should list URLs you want indexed, not the ones you exclude.",
        fix_hint: "List only indexable URLs in the sitemap.",
        technical_notes: "Review automatic sitemap generation in the CMS or plugins.",
    },
    CatalogEntry {
        code: "SITEMAP_URL_MISSING",
        name: "Important URLs missing from sitemap",
        severity: Severity::Minor,
        category: "sitemap",
        description: "Relevant pages are missing from the sitemap.",
        why_it_matters: "The sitemap is the priority guide for crawling key content.",
        fix_hint: "Add important indexable pages to the sitemap.",
        technical_notes: "Check the inclusion and exclusion rules of the sitemap generator.",
    },
    CatalogEntry {
        code: "SITEMAP_TOO_LARGE",
        name: "Sitemap too large",
        severity: Severity::Minor,
        category: "sitemap",
        description: "The sitemap exceeds the recommended size or URL count.",
        why_it_matters: "Smaller sitemaps are easier to manage and are processed more reliably.",
        fix_hint: "Split the sitemap into files under 50,000 URLs and 50 MB.",
        technical_notes: "Stay within 50,000 URLs or 50 MB uncompressed per sitemap.",
    },
    // Structured data
    CatalogEntry {
        code: "SCHEMA_SYNTAX_ERROR",
        name: "Structured data syntax errors",
        severity: Severity::Minor,
        category: "structured_data",
        description: "Structured data markup has syntax errors (JSON-LD, Microdata or RDFa).",
        why_it_matters: "Syntax errors stop search engines from interpreting the schema.",
        fix_hint: "Fix the JSON-LD so it validates.",
        technical_notes: "Validate with the official structured data testing tools.",
    },
    CatalogEntry {
        code: "SCHEMA_MISSING",
        name: "Missing schema markup",
        severity: Severity::Minor,
        category: "structured_data",
        description: "The page has no structured data markup.",
        why_it_matters: "Structured data enables rich results and helps search engines understand the content.",
        fix_hint: "Add structured data that matches the page type.",
        technical_notes: "Prefer JSON-LD.",
    },
    CatalogEntry {
        code: "SCHEMA_MISSING_REQUIRED_PROPERTY",
        name: "Schema missing required properties",
        severity: Severity::Minor,
        category: "structured_data",
        description: "Required or recommended properties are missing from the markup.",
        why_it_matters: "Incomplete markup leaves many rich results inactive or ineligible.",
        fix_hint: "Fill in the required properties for the schema type.",
        technical_notes: "Check the documentation of each type: Product, FAQ, HowTo and so on.",
    },
    CatalogEntry {
        code: "SCHEMA_WRONG_TYPE",
        name: "Wrong schema type",
        severity: Severity::Minor,
        category: "structured_data",
        description: "The schema type does not match the actual content.",
        why_it_matters: "Unrepresentative schema causes inconsistencies or is ignored.",
        fix_hint: "Use the schema type that describes the page content.",
        technical_notes: "Prefer a specific type over a generic one when one exists.",
    },
    // Pagination
    CatalogEntry {
        code: "PAGINATION_REL_NEXT_PREV_INCORRECT",
        name: "Incorrect rel=next/prev",
        severity: Severity::Minor,
        category: "technical",
        description: "rel='next' and rel='prev' pagination tags point at the wrong URLs.",
        why_it_matters: "Clear pagination helps understand long content series and large listings.",
        fix_hint: "Point rel=next/prev at the adjacent pages of the series.",
        technical_notes: "Search engine support has changed, but it still matters for UX and other bots.",
    },
    CatalogEntry {
        code: "PAGINATION_REL_NEXT_PREV_MISSING",
        name: "Missing pagination tags",
        severity: Severity::Minor,
        category: "technical",
        description: "Paginated listings do not declare rel='next' or rel='prev'.",
        why_it_matters: "Some bots and tools rely on it to understand listing structure.",
        fix_hint: "Link paginated pages to each other consistently.",
        technical_notes: "Review the front-end pagination components.",
    },
    CatalogEntry {
        code: "PAGINATION_PARAM_ISSUES",
        name: "Pagination parameter issues",
        severity: Severity::Minor,
        category: "technical",
        description: "Pagination parameters cause duplication or inefficient indexing.",
        why_it_matters: "Poorly managed pagination multiplies URLs without adding new value.",
        fix_hint: "Use one consistent pagination parameter and canonicalise variants.",
        technical_notes: "Pick one consistent convention such as ?page=2.",
    },
    // Security
    CatalogEntry {
        code: "HTTP_ON_HTTPS_SITE",
        name: "HTTP pages on an HTTPS site",
        severity: Severity::Major,
        category: "security",
        description: "Pages are reachable over HTTP on a domain that uses HTTPS.",
        why_it_matters: "HTTP on an HTTPS site triggers security warnings and erodes trust.",
        fix_hint: "Serve every page over HTTPS and redirect HTTP requests.",
        technical_notes: "Configure HSTS and permanent 301 redirects to HTTPS.",
    },
    CatalogEntry {
        code: "MIXED_CONTENT",
        name: "Mixed content",
        severity: Severity::Major,
        category: "security",
        description: "The page loads HTTP resources in an HTTPS context.",
        why_it_matters: "Mixed content breaks the padlock and modern browsers may block the resources.",
        fix_hint: "Load every resource over HTTPS.",
        technical_notes: "Search the code and CMS templates for 'http://'.",
    },
    CatalogEntry {
        code: "SSL_INVALID",
        name: "Expired or invalid SSL certificate",
        severity: Severity::Critical,
        category: "security",
        description: "The site certificate is expired, misconfigured or invalid.",
        why_it_matters: "Certificate errors block access in many browsers and destroy user trust.",
        fix_hint: "Renew or reinstall the certificate with the full chain.",
        technical_notes: "Check the CA, expiry dates and coverage of every relevant subdomain.",
    },
    CatalogEntry {
        code: "MISSING_HTTP_TO_HTTPS_REDIRECT",
        name: "Missing HTTP to HTTPS redirect",
        severity: Severity::Major,
        category: "security",
        description: "Not every HTTP URL redirects to its HTTPS version.",
        why_it_matters: "Exposed HTTP versions create duplication and security problems.",
        fix_hint: "Add a permanent redirect from HTTP to HTTPS.",
        technical_notes: "Configure the redirect at the server or CDN level.",
    },
    // Rendering
    CatalogEntry {
        code: "JS_BLOCKING_CONTENT",
        name: "Content hidden behind JavaScript",
        severity: Severity::Major,
        category: "javascript",
        description: "The main content depends on JavaScript that bots may not execute correctly.",
        why_it_matters: "If the script does not run for the crawler, it sees an empty or partial page.",
        fix_hint: "Render critical content server-side or in the initial HTML.",
        technical_notes: "Compare the rendered HTML with the initial HTML using inspection tools.",
    },
    CatalogEntry {
        code: "JS_BLOCKED_RESOURCES",
        name: "Blocked JS/CSS resources",
        severity: Severity::Minor,
        category: "javascript",
        description: "JS or CSS files are blocked by robots rules or access restrictions.",
        why_it_matters: "Blocking key resources stops search engines rendering the page as users see it.",
        fix_hint: "Allow crawlers to fetch scripts and styles needed for rendering.",
        technical_notes: "Review robots.txt and access rules for /static/, /assets/ and similar paths.",
    },
    CatalogEntry {
        code: "RENDERED_HTML_DIFFERS",
        name: "Raw and rendered HTML differ",
        severity: Severity::Minor,
        category: "javascript",
        description: "The initial HTML differs greatly from the rendered version.",
        why_it_matters: "What search engines see may differ from what users see, which hurts indexing.",
        fix_hint: "Keep titles, links and main content identical before and after rendering.",
        technical_notes: "Compare both versions with rendering tools such as URL inspection.",
    },
    // Server files
    CatalogEntry {
        code: "EMPTY_RESPONSE",
        name: "Empty responses",
        severity: Severity::Critical,
        category: "technical",
        description: "The server answers without useful content (empty body).",
        why_it_matters: "An empty response is as bad as a broken page for users and for SEO.",
        fix_hint: "Make the server return the page body for every valid URL.",
        technical_notes: "Check application and server logs for view rendering errors.",
    },
    CatalogEntry {
        code: "CSS_JS_BLOCKED",
        name: "Blocked CSS/JS resources",
        severity: Severity::Minor,
        category: "technical",
        description: "Key resources such as styles or scripts are blocked for bots.",
        why_it_matters: "Incomplete rendering can hurt how search engines assess UX.",
        fix_hint: "Unblock stylesheet and script paths in robots.txt.",
        technical_notes: "Review robots.txt and per-path configuration.",
    },
    CatalogEntry {
        code: "ROBOTS_TXT_INACCESSIBLE",
        name: "robots.txt inaccessible",
        severity: Severity::Major,
        category: "technical",
        description: "robots.txt cannot be fetched or returns an error.",
        why_it_matters: "Without an accessible robots.txt, bots may assume unwanted defaults or restrictions.",
        fix_hint: "Serve /robots.txt with a 200 response.",
        technical_notes: "Check permissions, deployments and proxies.",
    },
    CatalogEntry {
        code: "SITEMAP_XML_INACCESSIBLE",
        name: "sitemap.xml inaccessible",
        severity: Severity::Minor,
        category: "technical",
        description: "The main sitemap cannot be fetched or returns an error.",
        why_it_matters: "Without a working sitemap it is harder to steer crawling to key sections.",
        fix_hint: "Serve the sitemap with a 200 response and reference it in robots.txt.",
        technical_notes: "Check the exact URL, the sitemap index and the HTTP responses.",
    },
    CatalogEntry {
        code: "CHARSET_ISSUES",
        name: "Character encoding issues",
        severity: Severity::Minor,
        category: "technical",
        description: "The page has encoding problems (broken accents, odd symbols).",
        why_it_matters: "Encoding errors hurt readability and can affect how content is interpreted.",
        fix_hint: "Declare UTF-8 in headers and markup and store content as UTF-8.",
        technical_notes: "Review server, CMS and database encoding settings.",
    },
    // PageSpeed
    CatalogEntry {
        code: "PERF_LCP_SLOW",
        name: "Slow Largest Contentful Paint",
        severity: Severity::Major,
        category: "performance",
        description: "LCP is above the recommended threshold.",
        why_it_matters: "LCP is a key Core Web Vital for perceived speed and rankings.",
        fix_hint: "Optimise and preload the LCP element and cut render-blocking resources.",
        technical_notes: "Aim for LCP under 2500 ms on mobile.",
    },
    CatalogEntry {
        code: "PERF_FCP_SLOW",
        name: "Slow First Contentful Paint",
        severity: Severity::Minor,
        category: "performance",
        description: "FCP takes too long to show the first content.",
        why_it_matters: "A slow FCP makes users feel the page is not starting.",
        fix_hint: "Reduce server time and render-blocking CSS/JS.",
        technical_notes: "Review the render-blocking-resources audit in PageSpeed.",
    },
    CatalogEntry {
        code: "PERF_SI_SLOW",
        name: "High Speed Index",
        severity: Severity::Minor,
        category: "performance",
        description: "Speed Index shows the page is slow to fill visually.",
        why_it_matters: "A high Speed Index correlates with a feeling of slowness.",
        fix_hint: "Prioritise above-the-fold content and defer the rest.",
        technical_notes: "Follow the Lighthouse suggestions specific to Speed Index.",
    },
    CatalogEntry {
        code: "PERF_TBT_HIGH",
        name: "High Total Blocking Time",
        severity: Severity::Major,
        category: "performance",
        description: "The page stays blocked by long JavaScript tasks for too long.",
        why_it_matters: "High TBT hurts interactivity and is related to INP (Interaction to Next Paint).",
        fix_hint: "Split long tasks and defer non-essential JavaScript.",
        technical_notes: "Inspect the main thread in Lighthouse and DevTools.",
    },
    CatalogEntry {
        code: "PERF_CLS_HIGH",
        name: "High Cumulative Layout Shift",
        severity: Severity::Minor,
        category: "performance",
        description: "The layout shifts abruptly while the page loads.",
        why_it_matters: "High CLS is frustrating and affects a key Core Web Vital.",
        fix_hint: "Reserve space for images, ads and embeds.",
        technical_notes: "Aim for CLS under 0.1.",
    },
    CatalogEntry {
        code: "PERF_RENDER_BLOCKING_RESOURCES",
        name: "Render-blocking resources",
        severity: Severity::Minor,
        category: "performance",
        description: "CSS or JS load in a way that blocks page rendering.",
        why_it_matters: "Render blocking delays the display of the initial content.",
        fix_hint: "Inline critical CSS and load scripts with defer or async.",
        technical_notes: "Review the render-blocking-resources audit in PageSpeed.",
    },
    CatalogEntry {
        code: "PERF_UNUSED_JS",
        name: "Unused JavaScript",
        severity: Severity::Minor,
        category: "performance",
        description: "A significant amount of JavaScript is loaded but unused on the page.",
        why_it_matters: "Unused JS adds page weight and execution time without value.",
        fix_hint: "Remove dead code and split bundles per route.",
        technical_notes: "Review the unused-javascript audit in PageSpeed.",
    },
    CatalogEntry {
        code: "PERF_LARGE_JS_BUNDLES",
        name: "JavaScript bundles too large",
        severity: Severity::Major,
        category: "performance",
        description: "The main JavaScript files are very heavy.",
        why_it_matters: "Large bundles hurt TBT, FCP and LCP.",
        fix_hint: "Code-split, tree-shake and minify bundles.",
        technical_notes: "Inspect the network waterfall and coverage in DevTools.",
    },
    CatalogEntry {
        code: "PERF_LARGE_IMAGES",
        name: "Unoptimised images",
        severity: Severity::Major,
        category: "performance",
        description: "PageSpeed finds images that could be optimised further.",
        why_it_matters: "Large images are the most common cause of poor performance scores.",
        fix_hint: "Compress and resize images and serve WebP or AVIF.",
        technical_notes: "Review the efficient image encoding audits.",
    },
    CatalogEntry {
        code: "PERF_TEXT_NOT_COMPRESSED",
        name: "Text not compressed",
        severity: Severity::Minor,
        category: "performance",
        description: "Text resources are served without gzip or brotli compression.",
        why_it_matters: "Without compression, resources take much longer to download.",
        fix_hint: "Enable gzip or brotli for HTML, CSS and JS.",
        technical_notes: "Enable compression in the server, reverse proxy or CDN.",
    },
    CatalogEntry {
        code: "PERF_CACHE_POLICY_ISSUES",
        name: "Inefficient cache policy",
        severity: Severity::Minor,
        category: "performance",
        description: "Static resources lack an adequate cache policy.",
        why_it_matters: "Good caching markedly improves repeat visits.",
        fix_hint: "Set long cache lifetimes on versioned static assets.",
        technical_notes: "Review the efficient cache policy audit for static assets.",
    },
];
